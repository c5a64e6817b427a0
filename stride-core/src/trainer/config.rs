//! Configuration of [`Trainer`](super::Trainer).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// The total number of environment steps.
    pub max_env_steps: usize,

    /// Interval of evaluation in environment steps.
    pub eval_interval: usize,

    /// Interval of flushing records in environment steps.
    pub flush_record_interval: usize,

    /// Interval of recording computational cost in environment steps.
    pub record_compute_cost_interval: usize,

    /// Where to save the trained model.
    ///
    /// The best model so far goes to `(model_dir)/best`, the final one to
    /// `(model_dir)/latest`.
    pub model_dir: Option<String>,

    /// Where to write `evaluations.csv`.
    pub log_dir: Option<String>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_env_steps: 0,
            eval_interval: usize::MAX,
            flush_record_interval: usize::MAX,
            record_compute_cost_interval: usize::MAX,
            model_dir: None,
            log_dir: None,
        }
    }
}

impl TrainerConfig {
    /// Sets the total number of environment steps.
    pub fn max_env_steps(mut self, v: usize) -> Self {
        self.max_env_steps = v;
        self
    }

    /// Sets the interval of evaluation in environment steps.
    pub fn eval_interval(mut self, v: usize) -> Self {
        self.eval_interval = v;
        self
    }

    /// Sets the interval of flushing records in environment steps.
    pub fn flush_record_interval(mut self, v: usize) -> Self {
        self.flush_record_interval = v;
        self
    }

    /// Sets the interval of recording computation cost in environment steps.
    pub fn record_compute_cost_interval(mut self, v: usize) -> Self {
        self.record_compute_cost_interval = v;
        self
    }

    /// Sets the directory where models are saved.
    pub fn model_dir(mut self, v: impl Into<String>) -> Self {
        self.model_dir = Some(v.into());
        self
    }

    /// Sets the directory where evaluation results are written.
    pub fn log_dir(mut self, v: impl Into<String>) -> Self {
        self.log_dir = Some(v.into());
        self
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_trainer_config() -> Result<()> {
        let config = TrainerConfig::default()
            .max_env_steps(10_000_000)
            .eval_interval(2500)
            .model_dir("models")
            .log_dir("logs");

        let dir = TempDir::new("trainer_config")?;
        let path = dir.path().join("trainer_config.yaml");

        config.save(&path)?;
        let config_ = TrainerConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
