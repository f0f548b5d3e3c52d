//! Observer adapters for rollout runs

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{Result, ports::RolloutObserver, rollout::EpisodeRecord};

/// Progress bar observer - shows rollout progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    best_return: Option<f64>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        ProgressObserver {
            progress_bar: None,
            best_return: None,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl RolloutObserver for ProgressObserver {
    fn on_rollout_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, record: &EpisodeRecord) -> Result<()> {
        let best = match self.best_return {
            Some(best) if best >= record.total_return => best,
            _ => record.total_return,
        };
        self.best_return = Some(best);

        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
            pb.set_message(format!("best return {best:.3}"));
        }
        Ok(())
    }

    fn on_rollout_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            match self.best_return {
                Some(best) => pb.finish_with_message(format!("best return {best:.3}")),
                None => pb.finish(),
            }
        }
        Ok(())
    }
}

/// Metrics observer - tracks aggregate rollout metrics
pub struct MetricsObserver {
    episodes: usize,
    total_steps: usize,
    completed_trees: usize,
    best_return: Option<f64>,
}

/// Snapshot of the metrics collected so far
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub episodes: usize,
    pub completed_trees: usize,
    pub completion_rate: f64,
    pub avg_episode_length: f64,
    pub best_return: Option<f64>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        MetricsObserver {
            episodes: 0,
            total_steps: 0,
            completed_trees: 0,
            best_return: None,
        }
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    /// Fraction of episodes that finished with a full spanning tree
    pub fn completion_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.completed_trees as f64 / self.episodes as f64
        }
    }

    pub fn avg_episode_length(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.episodes as f64
        }
    }

    pub fn best_return(&self) -> Option<f64> {
        self.best_return
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            episodes: self.episodes,
            completed_trees: self.completed_trees,
            completion_rate: self.completion_rate(),
            avg_episode_length: self.avg_episode_length(),
            best_return: self.best_return,
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl RolloutObserver for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, record: &EpisodeRecord) -> Result<()> {
        self.episodes += 1;
        self.total_steps += record.length;
        if record.completed_tree {
            self.completed_trees += 1;
        }
        self.best_return = Some(match self.best_return {
            Some(best) if best >= record.total_return => best,
            _ => record.total_return,
        });
        Ok(())
    }
}
