//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{
    record::{Record, RecordValue, Recorder},
    Env, Policy,
};
use anyhow::{bail, Result};
use log::info;
use std::marker::PhantomData;

/// Return and length of an episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    /// Sum of rewards over the episode.
    pub episode_return: f32,

    /// Number of environment steps in the episode.
    pub length: usize,
}

/// Runs a fixed number of episodes and reports the returns.
///
/// Episode `ix` starts with [`Env::reset_with_index`]`(ix)`, so repeated
/// evaluations see the same sequence of initial states when the environment
/// seeds itself from the index.
pub struct DefaultEvaluator<E: Env, P: Policy<E>> {
    n_episodes: usize,
    env: E,
    phantom: PhantomData<P>,
}

impl<E: Env, P: Policy<E>> DefaultEvaluator<E, P> {
    /// Constructs a new [`DefaultEvaluator`] building the environment from `config`.
    ///
    /// Fails if `n_episodes` is zero.
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        Self::from_env(E::build(config, seed)?, n_episodes)
    }

    /// Constructs a new [`DefaultEvaluator`] with an already built environment.
    ///
    /// Fails if `n_episodes` is zero, as there would be no return to report.
    pub fn from_env(env: E, n_episodes: usize) -> Result<Self> {
        if n_episodes == 0 {
            bail!("Evaluation needs at least one episode");
        }
        Ok(Self {
            n_episodes,
            env,
            phantom: PhantomData,
        })
    }

    /// Returns the number of episodes per evaluation.
    pub fn n_episodes(&self) -> usize {
        self.n_episodes
    }

    /// Mutable access to the evaluation environment.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Runs the episodes and returns their summaries.
    ///
    /// If `recorder` is given, every step is written to it with keys `episode`,
    /// `step` and `reward` in addition to the record emitted by the environment.
    pub fn run_episodes(
        &mut self,
        policy: &mut P,
        mut recorder: Option<&mut dyn Recorder>,
    ) -> Result<Vec<EpisodeSummary>> {
        let mut summaries = Vec::with_capacity(self.n_episodes);

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;
            let mut summary = EpisodeSummary {
                episode_return: 0.0,
                length: 0,
            };

            loop {
                let act = policy.sample(&prev_obs);
                let (step, mut record) = self.env.step(&act)?;
                summary.episode_return += step.reward;

                if let Some(recorder) = recorder.as_mut() {
                    record.insert("episode", RecordValue::Scalar(ix as _));
                    record.insert("step", RecordValue::Scalar(summary.length as _));
                    record.insert("reward", RecordValue::Scalar(step.reward));
                    recorder.write(record);
                }

                summary.length += 1;
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }

            info!(
                "Episode {}: return = {}, length = {}",
                ix, summary.episode_return, summary.length
            );
            summaries.push(summary);
        }

        Ok(summaries)
    }

    /// Aggregates episode summaries into a [`Record`].
    ///
    /// Keys are `episode_return_mean`, `episode_return_std` and `episode_length_mean`.
    pub fn summarize(summaries: &[EpisodeSummary]) -> Record {
        if summaries.is_empty() {
            return Record::empty();
        }
        let n = summaries.len() as f32;
        let mean = summaries.iter().map(|s| s.episode_return).sum::<f32>() / n;
        let var = summaries
            .iter()
            .map(|s| (s.episode_return - mean).powi(2))
            .sum::<f32>()
            / n;
        let len_mean = summaries.iter().map(|s| s.length as f32).sum::<f32>() / n;

        Record::from_slice(&[
            ("episode_return_mean", RecordValue::Scalar(mean)),
            ("episode_return_std", RecordValue::Scalar(var.sqrt())),
            ("episode_length_mean", RecordValue::Scalar(len_mean)),
        ])
    }
}

impl<E: Env, P: Policy<E>> Evaluator<E, P> for DefaultEvaluator<E, P> {
    fn evaluate(&mut self, policy: &mut P) -> Result<Record> {
        let summaries = self.run_episodes(policy, None)?;
        Ok(Self::summarize(&summaries))
    }
}
