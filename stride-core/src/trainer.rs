//! Train [`Agent`].
mod config;
mod sampler;
use crate::{
    record::{
        AggregateRecorder, Record,
        RecordValue::{DateTime, Scalar},
    },
    Agent, Env, Evaluator, ExperienceBufferBase, RolloutBufferBase, StepProcessor,
};
use anyhow::{Context, Result};
use chrono::Local;
pub use config::TrainerConfig;
use log::{info, warn};
pub use sampler::Sampler;
use serde::Serialize;
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

/// A row of `evaluations.csv`.
#[derive(Debug, Serialize)]
struct EvalRow {
    datetime: String,
    env_steps: usize,
    episode_return_mean: f32,
    episode_return_std: f32,
}

/// Returns `true` every `interval` steps; an interval of zero never fires.
fn every(steps: usize, interval: usize) -> bool {
    interval != 0 && steps % interval == 0
}

/// Manages the on-policy training loop.
///
/// # Training loop
///
/// 0. Given an agent implementing [`Agent`], a rollout buffer, a recorder
///    implementing [`AggregateRecorder`] and an [`Evaluator`].
/// 1. Reset the counter of environment steps: `env_steps = 0`.
/// 2. Do an environment step with [`Sampler`] and push the transition into the
///    rollout buffer. `env_steps += 1`.
/// 3. If the buffer holds a complete rollout:
///     1. Give the agent the remaining progress `1 - env_steps / max_env_steps`.
///     2. Do an optimization step on the rollout, then clear the buffer.
/// 4. If `env_steps % eval_interval == 0`:
///     * Evaluate the agent and add the mean return to the record as `"eval_reward"`,
///       with the time of the evaluation as `"datetime"`.
///     * Append the result to `(log_dir)/evaluations.csv`.
///     * If the mean return is the best so far, save the agent in `(model_dir)/best`.
/// 5. If `env_steps == max_env_steps`, save the agent in `(model_dir)/latest`
///    and finish. Otherwise back to 2.
///
/// A failure to save the model is logged and does not stop training.
pub struct Trainer {
    config: TrainerConfig,

    /// Time spent in optimization steps since the last record of computation cost.
    opt_time: Duration,

    /// Optimization steps since the last record of computation cost.
    opt_steps_for_ops: usize,
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Self {
        Self {
            config,
            opt_time: Duration::new(0, 0),
            opt_steps_for_ops: 0,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    fn save_model<E, R, A>(agent: &A, path: PathBuf)
    where
        E: Env,
        R: RolloutBufferBase,
        A: Agent<E, R>,
    {
        match agent.save_params(&path) {
            Ok(()) => info!("Saved the model in {:?}.", &path),
            Err(e) => warn!("Failed to save model in {:?}: {}", &path, e),
        }
    }

    fn model_path(&self, name: &str) -> Option<PathBuf> {
        self.config
            .model_dir
            .as_ref()
            .map(|dir| Path::new(dir).join(name))
    }

    /// Returns optimization steps per second, then resets the internal counter.
    fn opt_steps_per_sec(&mut self) -> f32 {
        let secs = self.opt_time.as_secs_f32();
        let osps = if secs > 0.0 {
            self.opt_steps_for_ops as f32 / secs
        } else {
            0.0
        };
        self.opt_steps_for_ops = 0;
        self.opt_time = Duration::new(0, 0);
        osps
    }

    fn write_eval_row(&self, row: &EvalRow) -> Result<()> {
        let dir = match self.config.log_dir.as_ref() {
            Some(dir) => Path::new(dir),
            None => return Ok(()),
        };
        fs::create_dir_all(dir)?;
        let path = dir.join("evaluations.csv");
        let is_new = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {:?}", &path))?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        wtr.serialize(row)?;
        wtr.flush()?;
        Ok(())
    }

    /// Performs a training step.
    ///
    /// It does an environment step, and an optimization step if the rollout
    /// buffer became full. The second element of the returned tuple is `true`
    /// if an optimization step was done.
    pub fn train_step<E, P, R, A>(
        &mut self,
        agent: &mut A,
        buffer: &mut R,
        sampler: &mut Sampler<E, P>,
        env_steps: &mut usize,
    ) -> Result<(Record, bool)>
    where
        E: Env,
        P: StepProcessor<E>,
        R: ExperienceBufferBase<Item = P::Output> + RolloutBufferBase,
        A: Agent<E, R>,
    {
        let mut record = sampler.sample_and_push(agent, buffer)?;
        *env_steps += 1;

        if !buffer.is_full() {
            return Ok((record, false));
        }

        let progress_remaining = 1.0 - *env_steps as f64 / self.config.max_env_steps as f64;
        agent.set_progress_remaining(progress_remaining);

        let timer = Instant::now();
        let record_agent = agent.opt_with_record(buffer);
        self.opt_time += timer.elapsed();
        self.opt_steps_for_ops += 1;
        buffer.clear();

        record.merge_inplace(record_agent);
        Ok((record, true))
    }

    /// Train the agent.
    pub fn train<E, P, R, A, D>(
        &mut self,
        env: E,
        step_proc: P,
        agent: &mut A,
        buffer: &mut R,
        recorder: &mut Box<dyn AggregateRecorder>,
        evaluator: &mut D,
    ) -> Result<()>
    where
        E: Env,
        P: StepProcessor<E>,
        R: ExperienceBufferBase<Item = P::Output> + RolloutBufferBase,
        A: Agent<E, R>,
        D: Evaluator<E, A>,
    {
        let mut sampler = Sampler::new(env, step_proc);
        let mut max_eval_reward = f32::MIN;
        let mut env_steps: usize = 0;
        let mut opt_steps: usize = 0;
        sampler.reset_fps_counter();
        agent.train();
        info!(
            "Start training for {} environment steps",
            self.config.max_env_steps
        );

        while env_steps < self.config.max_env_steps {
            let (mut record, is_opt) =
                self.train_step(agent, buffer, &mut sampler, &mut env_steps)?;
            if is_opt {
                opt_steps += 1;
            }

            if every(env_steps, self.config.record_compute_cost_interval) {
                record.insert("fps", Scalar(sampler.fps()));
                record.insert("opt_steps_per_sec", Scalar(self.opt_steps_per_sec()));
                sampler.reset_fps_counter();
            }

            if every(env_steps, self.config.eval_interval) {
                info!("Starts evaluation of the trained model");
                agent.eval();
                let eval_record = evaluator.evaluate(agent)?;
                agent.train();
                let eval_reward = eval_record.get_scalar("episode_return_mean")?;
                let eval_std = eval_record.get_scalar("episode_return_std").unwrap_or(0.0);
                info!(
                    "env_steps = {}, eval_reward = {} +/- {}",
                    env_steps, eval_reward, eval_std
                );
                let now = Local::now();
                record.insert("eval_reward", Scalar(eval_reward));
                record.insert("datetime", DateTime(now));
                self.write_eval_row(&EvalRow {
                    datetime: now.to_rfc3339(),
                    env_steps,
                    episode_return_mean: eval_reward,
                    episode_return_std: eval_std,
                })?;

                if eval_reward > max_eval_reward {
                    max_eval_reward = eval_reward;
                    if let Some(path) = self.model_path("best") {
                        info!("New best mean reward {}", eval_reward);
                        Self::save_model::<E, R, A>(agent, path);
                    }
                }
            }

            if !record.is_empty() {
                record.insert("opt_steps", Scalar(opt_steps as _));
                recorder.store(record);
            }

            if every(env_steps, self.config.flush_record_interval) {
                recorder.flush(env_steps as _);
            }
        }

        recorder.flush(env_steps as _);
        info!(
            "Finished training: {} environment steps, {} optimization steps, {} episodes",
            env_steps,
            opt_steps,
            sampler.n_episodes()
        );
        if let Some(path) = self.model_path("latest") {
            Self::save_model::<E, R, A>(agent, path);
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        dummy::{CountdownEnv, CountdownEnvConfig, CountingAgent, DummyRolloutBuffer},
        rollout_buffer::{SimpleRolloutBufferConfig, SimpleStepProcessor, SimpleStepProcessorConfig},
        DefaultEvaluator,
    };
    use std::{cell::RefCell, rc::Rc};
    use tempdir::TempDir;

    type StepProc = SimpleStepProcessor<CountdownEnv>;

    /// Keeps stored records where the test can read them.
    struct StoringRecorder(Rc<RefCell<Vec<Record>>>);

    impl AggregateRecorder for StoringRecorder {
        fn store(&mut self, record: Record) {
            self.0.borrow_mut().push(record);
        }

        fn flush(&mut self, _step: i64) {}
    }

    #[test]
    fn test_train_optimizes_per_rollout() -> Result<()> {
        let dir = TempDir::new("trainer")?;
        let model_dir = dir.path().join("models");
        let log_dir = dir.path().join("logs");
        let env_config = CountdownEnvConfig::default().episode_len(7);
        let config = TrainerConfig::default()
            .max_env_steps(40)
            .eval_interval(20)
            .model_dir(model_dir.to_str().unwrap())
            .log_dir(log_dir.to_str().unwrap());

        let env = CountdownEnv::build(&env_config, 0)?;
        let step_proc = StepProc::build(&SimpleStepProcessorConfig::default());
        let mut buffer =
            DummyRolloutBuffer::build(&SimpleRolloutBufferConfig::default().n_steps(8));
        let mut agent = CountingAgent::default();
        let stored = Rc::new(RefCell::new(vec![]));
        let mut recorder: Box<dyn AggregateRecorder> = Box::new(StoringRecorder(stored.clone()));
        let mut evaluator = DefaultEvaluator::<CountdownEnv, CountingAgent>::new(&env_config, 0, 2)?;

        let mut trainer = Trainer::build(config);
        trainer.train(
            env,
            step_proc,
            &mut agent,
            &mut buffer,
            &mut recorder,
            &mut evaluator,
        )?;

        // 40 env steps with rollouts of 8 transitions
        assert_eq!(agent.n_opts, 5);
        assert!(agent.rollout_sizes.iter().all(|&n| n == 8));
        let expected = [0.8, 0.6, 0.4, 0.2, 0.0];
        assert_eq!(agent.progress.len(), expected.len());
        for (p, e) in agent.progress.iter().zip(expected.iter()) {
            assert!((p - e).abs() < 1e-9);
        }
        assert!(agent.is_train());

        // Equal eval rewards: only the first evaluation is the best one.
        let mut best = CountingAgent::default();
        best.load_params(&model_dir.join("best"))?;
        assert_eq!(best.n_opts, 2);

        let mut latest = CountingAgent::default();
        latest.load_params(&model_dir.join("latest"))?;
        assert_eq!(latest.n_opts, 5);

        let csv = std::fs::read_to_string(log_dir.join("evaluations.csv"))?;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "datetime,env_steps,episode_return_mean,episode_return_std"
        );
        assert_eq!(lines.len(), 3);
        let row: Vec<&str> = lines[1].split(',').collect();
        assert!(chrono::DateTime::parse_from_rfc3339(row[0]).is_ok());
        assert_eq!(row[1], "20");
        assert!(row[2].starts_with('7'));

        // Episodes of 7 steps end at steps 7, 14, ..., 35.
        let stored = stored.borrow();
        let episodes: Vec<&Record> = stored
            .iter()
            .filter(|r| r.get("episode_return").is_some())
            .collect();
        assert_eq!(episodes.len(), 5);
        assert!(episodes
            .iter()
            .all(|r| r.get_scalar("episode_length").unwrap() == 7.0));
        let evals: Vec<&Record> = stored
            .iter()
            .filter(|r| r.get("eval_reward").is_some())
            .collect();
        assert_eq!(evals.len(), 2);
        assert!(evals
            .iter()
            .all(|r| matches!(r.get("datetime"), Some(DateTime(_)))));
        Ok(())
    }
}
