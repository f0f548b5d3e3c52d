//! Observer port - abstraction for rollout observation and data collection
//!
//! Observers can be composed to collect different kinds of data while
//! episodes are played, without coupling the runner to specific output
//! formats. Progress bars and metrics trackers are adapters implementing
//! this port.
//!
//! # Event Sequence
//!
//! 1. `on_rollout_start(total_episodes)` - once at the beginning
//! 2. For each episode:
//!    - `on_episode_start(episode)`
//!    - `on_step(...)` - for each applied edge
//!    - `on_episode_end(episode, record)`
//! 3. `on_rollout_end()` - once at the end

use crate::{Result, rollout::EpisodeRecord, spanning::TreeState};

/// Observer trait for monitoring rollouts
pub trait RolloutObserver: Send {
    /// Called once before the first episode.
    fn on_rollout_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each applied edge.
    ///
    /// `state` is the state after the apply; `reward` is the step reward
    /// for the chosen `edge`.
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _state: &TreeState,
        _edge: usize,
        _reward: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a terminal state.
    fn on_episode_end(&mut self, _episode: usize, _record: &EpisodeRecord) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    ///
    /// Use this to finalize outputs or display summaries.
    fn on_rollout_end(&mut self) -> Result<()> {
        Ok(())
    }
}
