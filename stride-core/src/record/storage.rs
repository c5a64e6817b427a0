//! Record storage and aggregation.
use super::{Record, RecordValue};
use log::warn;
use std::collections::HashSet;
use xxhash_rust::xxh3::Xxh3Builder;

/// A storage system for records with aggregation capabilities.
///
/// Scalars stored under the same key are reduced to `<key>_min`, `<key>_max`,
/// `<key>_mean` and `<key>_median`, unless only one value was stored, in which
/// case it is written under `<key>` as is. For the other value types the most
/// recent value is kept.
#[derive(Default)]
pub struct RecordStorage {
    data: Vec<Record>,
}

fn min(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().copied().fold(f32::INFINITY, f32::min))
}

fn max(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().copied().fold(f32::NEG_INFINITY, f32::max))
}

fn mean(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().sum::<f32>() / vs.len() as f32)
}

fn median(mut vs: Vec<f32>) -> RecordValue {
    vs.sort_by(|x, y| x.total_cmp(y));
    RecordValue::Scalar(vs[vs.len() / 2])
}

impl RecordStorage {
    /// Creates a new empty record storage.
    pub fn new() -> Self {
        Self { data: vec![] }
    }

    /// Stores a record in the storage.
    pub fn store(&mut self, record: Record) {
        self.data.push(record);
    }

    /// Returns `true` if no record has been stored since the last aggregation.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn get_keys(&self) -> HashSet<String, Xxh3Builder> {
        let mut keys = HashSet::<String, Xxh3Builder>::default();
        for record in self.data.iter() {
            for k in record.keys() {
                keys.insert(k.clone());
            }
        }
        keys
    }

    fn latest(&self, key: &str) -> Option<&RecordValue> {
        self.data.iter().rev().find_map(|record| record.get(key))
    }

    fn scalar(&self, key: &str) -> Record {
        let vs: Vec<f32> = self
            .data
            .iter()
            .filter_map(|record| match record.get(key) {
                Some(RecordValue::Scalar(v)) => Some(*v),
                Some(v) => {
                    warn!("Expect RecordValue::Scalar for {}, got {:?}", key, v);
                    None
                }
                None => None,
            })
            .collect();

        match vs.len() {
            0 => Record::empty(),
            1 => Record::from_scalar(key, vs[0]),
            _ => Record::from_slice(&[
                (format!("{}_min", key), min(&vs)),
                (format!("{}_max", key), max(&vs)),
                (format!("{}_mean", key), mean(&vs)),
                (format!("{}_median", key), median(vs)),
            ]),
        }
    }

    /// Aggregates all stored records and clears the storage.
    pub fn aggregate(&mut self) -> Record {
        let mut record = Record::empty();

        for key in self.get_keys().iter() {
            let r = match self.latest(key) {
                Some(RecordValue::Scalar(..)) => self.scalar(key),
                Some(value) => Record::from_slice(&[(key.as_str(), value.clone())]),
                None => continue,
            };
            record.merge_inplace(r);
        }

        self.data.clear();

        record
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_aggregate_scalars() {
        let mut storage = RecordStorage::new();
        for v in [4.0, 1.0, 3.0, 2.0] {
            storage.store(Record::from_scalar("episode_return", v));
        }
        storage.store(Record::from_scalar("eval_reward", 7.0));

        let record = storage.aggregate();
        assert_eq!(record.get_scalar("episode_return_min").unwrap(), 1.0);
        assert_eq!(record.get_scalar("episode_return_max").unwrap(), 4.0);
        assert_eq!(record.get_scalar("episode_return_mean").unwrap(), 2.5);
        assert_eq!(record.get_scalar("episode_return_median").unwrap(), 3.0);
        assert_eq!(record.get_scalar("eval_reward").unwrap(), 7.0);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_aggregate_keeps_latest_datetime() {
        let first = Local::now();
        let second = first + chrono::Duration::seconds(5);
        let mut storage = RecordStorage::new();
        storage.store(Record::from_slice(&[("datetime", RecordValue::DateTime(first))]));
        storage.store(Record::from_scalar("eval_reward", 1.0));
        storage.store(Record::from_slice(&[("datetime", RecordValue::DateTime(second))]));

        let record = storage.aggregate();
        match record.get("datetime") {
            Some(RecordValue::DateTime(t)) => assert_eq!(*t, second),
            v => panic!("Expect the latest DateTime, got {:?}", v),
        }
    }
}
