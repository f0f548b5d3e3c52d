//! Episode rollout runner

use std::path::Path;

use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::{
    Result,
    descriptor::SpanningTreeGame,
    ports::{Policy, RolloutObserver},
};

/// Rollout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolloutConfig {
    /// Number of episodes to play
    pub episodes: usize,

    /// Random seed forwarded to the policy
    pub seed: Option<u64>,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        RolloutConfig {
            episodes: 100,
            seed: None,
        }
    }
}

/// Outcome of one completed episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub policy: String,
    /// Chosen edge indices, oldest first
    pub moves: Vec<usize>,
    pub length: usize,
    /// Sum of the chosen edges' weights
    pub total_weight: f64,
    /// Cumulative return (negative total weight)
    pub total_return: f64,
    /// Whether the episode ended with a full spanning tree
    pub completed_tree: bool,
}

/// Summary statistics over a batch of episodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolloutSummary {
    pub episodes: usize,
    pub policy: String,
    pub mean_return: f64,
    pub std_dev_return: f64,
    pub best_return: f64,
    pub worst_return: f64,
    pub mean_length: f64,
}

impl RolloutSummary {
    /// Summarize a batch; `None` when no episodes were recorded.
    pub fn from_records(records: &[EpisodeRecord]) -> Option<Self> {
        let first = records.first()?;
        let returns: Vec<f64> = records.iter().map(|r| r.total_return).collect();
        let lengths: Vec<f64> = records.iter().map(|r| r.length as f64).collect();

        let std_dev_return = if records.len() > 1 {
            (&returns).std_dev()
        } else {
            0.0
        };

        Some(RolloutSummary {
            episodes: records.len(),
            policy: first.policy.clone(),
            mean_return: (&returns).mean(),
            std_dev_return,
            best_return: (&returns).max(),
            worst_return: (&returns).min(),
            mean_length: (&lengths).mean(),
        })
    }

    /// Save the summary to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a summary from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let summary = serde_json::from_reader(file)?;
        Ok(summary)
    }
}

/// Generate a random symmetric weight table with a zero diagonal,
/// entries drawn uniformly from `[0, 1)`.
pub fn random_symmetric_weights(num_nodes: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut weights = vec![0.0; num_nodes * num_nodes];
    for row in 0..num_nodes {
        for column in (row + 1)..num_nodes {
            let weight: f64 = rng.random_range(0.0..1.0);
            weights[row * num_nodes + column] = weight;
            weights[column * num_nodes + row] = weight;
        }
    }
    weights
}

/// Plays complete episodes of a configured game with a policy, notifying
/// observers along the way
pub struct RolloutRunner {
    config: RolloutConfig,
    observers: Vec<Box<dyn RolloutObserver>>,
}

impl RolloutRunner {
    pub fn new(config: RolloutConfig) -> Self {
        RolloutRunner {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer (builder style).
    pub fn with_observer(mut self, observer: Box<dyn RolloutObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play the configured number of episodes and collect one record each.
    ///
    /// Every episode runs until the legal-action set is exhausted, which for
    /// this game means a full spanning tree has been built.
    ///
    /// # Errors
    ///
    /// Returns error if the policy fails to choose or an observer hook fails.
    pub fn run(
        &mut self,
        game: &SpanningTreeGame,
        policy: &mut dyn Policy,
    ) -> Result<Vec<EpisodeRecord>> {
        if let Some(seed) = self.config.seed {
            policy.set_rng_seed(seed);
        }

        for observer in &mut self.observers {
            observer.on_rollout_start(self.config.episodes)?;
        }

        let mut records = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let mut state = game.new_initial_state();
            let mut step = 0;
            loop {
                let legal = state.legal_actions();
                if legal.is_empty() {
                    break;
                }
                let edge = policy.choose_edge(&state, &legal)?;
                state.apply(edge)?;

                let reward = state.rewards()[0];
                for observer in &mut self.observers {
                    observer.on_step(episode, step, &state, edge, reward)?;
                }
                step += 1;
            }

            let total_return = state.returns()[0];
            let record = EpisodeRecord {
                episode,
                policy: policy.name().to_string(),
                moves: state.history().to_vec(),
                length: state.move_count(),
                total_weight: -total_return,
                total_return,
                completed_tree: state.graph().is_spanning_tree(),
            };

            for observer in &mut self.observers {
                observer.on_episode_end(episode, &record)?;
            }
            records.push(record);
        }

        for observer in &mut self.observers {
            observer.on_rollout_end()?;
        }

        Ok(records)
    }
}
