//! Collects transitions from the environment into the rollout buffer.
use crate::{
    record::{Record, RecordValue},
    Agent, Env, ExperienceBufferBase, RolloutBufferBase, StepProcessor,
};
use anyhow::Result;
use std::time::Instant;

/// Runs the agent in the environment and pushes transitions into a buffer.
///
/// It also does the bookkeeping of a monitor: when an episode ends, its return
/// and length are added to the returned record as `episode_return` and
/// `episode_length`.
pub struct Sampler<E, P>
where
    E: Env,
    P: StepProcessor<E>,
{
    env: E,
    prev_obs: Option<E::Obs>,
    step_processor: P,
    episode_return: f32,
    episode_length: usize,
    n_episodes: usize,
    n_frames: usize,
    timer: Instant,
}

impl<E, P> Sampler<E, P>
where
    E: Env,
    P: StepProcessor<E>,
{
    /// Creates a new sampler with the given environment and step processor.
    pub fn new(env: E, step_processor: P) -> Self {
        Self {
            env,
            prev_obs: None,
            step_processor,
            episode_return: 0.0,
            episode_length: 0,
            n_episodes: 0,
            n_frames: 0,
            timer: Instant::now(),
        }
    }

    /// Number of episodes finished so far.
    pub fn n_episodes(&self) -> usize {
        self.n_episodes
    }

    /// Resets the counter of frames per second.
    pub fn reset_fps_counter(&mut self) {
        self.n_frames = 0;
        self.timer = Instant::now();
    }

    /// Returns environment steps per second since the last reset of the counter.
    pub fn fps(&self) -> f32 {
        let secs = self.timer.elapsed().as_secs_f32();
        if secs > 0.0 {
            self.n_frames as f32 / secs
        } else {
            0.0
        }
    }

    /// Samples an action, applies it to the environment and pushes the
    /// resulting transition into `buffer`.
    pub fn sample_and_push<A, R>(&mut self, agent: &mut A, buffer: &mut R) -> Result<Record>
    where
        A: Agent<E, R>,
        R: ExperienceBufferBase<Item = P::Output> + RolloutBufferBase,
    {
        let prev_obs = match self.prev_obs.take() {
            Some(obs) => obs,
            None => {
                let obs = self.env.reset()?;
                self.step_processor.reset(obs.clone());
                obs
            }
        };

        let act = agent.sample(&prev_obs);
        let (step, mut record) = self.env.step_with_reset(&act)?;
        let is_done = step.is_done();
        self.episode_return += step.reward;
        self.episode_length += 1;
        self.n_frames += 1;

        let next_obs = match (is_done, step.init_obs.as_ref()) {
            (true, Some(init_obs)) => init_obs.clone(),
            _ => step.obs.clone(),
        };

        let transition = self.step_processor.process(step);
        buffer.push(transition)?;

        if is_done {
            record.insert("episode_return", RecordValue::Scalar(self.episode_return));
            record.insert(
                "episode_length",
                RecordValue::Scalar(self.episode_length as _),
            );
            self.n_episodes += 1;
            self.episode_return = 0.0;
            self.episode_length = 0;
        }
        self.prev_obs = Some(next_obs);

        Ok(record)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        dummy::{CountdownEnv, CountdownEnvConfig, CountingAgent, DummyObs, DummyRolloutBuffer},
        rollout_buffer::{SimpleRolloutBufferConfig, SimpleStepProcessor, SimpleStepProcessorConfig},
    };

    #[test]
    fn test_episode_records_and_init_obs() -> Result<()> {
        let config = CountdownEnvConfig::default().episode_len(3).reward(0.5);
        let env = CountdownEnv::build(&config, 0)?;
        let step_proc =
            SimpleStepProcessor::<CountdownEnv>::build(&SimpleStepProcessorConfig::default());
        let mut sampler = Sampler::new(env, step_proc);
        let mut agent = CountingAgent::default();
        let mut buffer =
            DummyRolloutBuffer::build(&SimpleRolloutBufferConfig::default().n_steps(10));

        let records = (0..6)
            .map(|_| sampler.sample_and_push(&mut agent, &mut buffer))
            .collect::<Result<Vec<_>>>()?;

        for (i, record) in records.iter().enumerate() {
            if i == 2 || i == 5 {
                assert_eq!(record.get_scalar("episode_return")?, 1.5);
                assert_eq!(record.get_scalar("episode_length")?, 3.0);
            } else {
                assert!(record.get("episode_return").is_none());
                assert!(record.get("episode_length").is_none());
            }
        }
        assert_eq!(sampler.n_episodes(), 2);

        // The last transition of an episode ends on the terminal observation,
        // the next one starts from the first observation of the new episode.
        let trs = buffer.transitions();
        assert_eq!(trs.len(), 6);
        assert_eq!(trs[2].obs, DummyObs(1.0));
        assert_eq!(trs[2].next_obs, DummyObs(0.0));
        assert!(trs[2].is_truncated);
        assert_eq!(trs[3].obs, DummyObs(3.0));
        assert_eq!(trs[3].next_obs, DummyObs(2.0));
        assert!(!trs[3].is_truncated);
        Ok(())
    }
}
