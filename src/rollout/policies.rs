//! Edge-selection policies used by the rollout runner

use std::str::FromStr;

use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};

use crate::{
    Error, Result,
    ports::Policy,
    spanning::TreeState,
};

/// Built-in policy selection for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Random,
    Greedy,
}

impl PolicyKind {
    /// Instantiate the chosen policy, seeding it when a seed is given.
    pub fn build(self, seed: Option<u64>) -> Box<dyn Policy> {
        match self {
            PolicyKind::Random => {
                let policy = match seed {
                    Some(seed) => RandomPolicy::seeded(seed),
                    None => RandomPolicy::new(),
                };
                Box::new(policy)
            }
            PolicyKind::Greedy => Box::new(GreedyPolicy::new()),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match input.to_lowercase().as_str() {
            "random" => Ok(PolicyKind::Random),
            "greedy" => Ok(PolicyKind::Greedy),
            other => Err(Error::ParsePolicy {
                input: other.to_string(),
                expected: "random, greedy".to_string(),
            }),
        }
    }
}

/// Picks uniformly among the legal edges
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self::seeded(rand::random::<u64>())
    }

    pub fn seeded(seed: u64) -> Self {
        RandomPolicy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn choose_edge(&mut self, _state: &TreeState, legal: &[usize]) -> Result<usize> {
        legal
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoLegalActions)
    }

    fn name(&self) -> &str {
        "random"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Picks the cheapest legal edge, breaking ties by lowest edge index
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        GreedyPolicy
    }
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for GreedyPolicy {
    fn choose_edge(&mut self, state: &TreeState, legal: &[usize]) -> Result<usize> {
        let mut best = *legal.first().ok_or(Error::NoLegalActions)?;
        for &edge in &legal[1..] {
            if state.graph().weight(edge) < state.graph().weight(best) {
                best = edge;
            }
        }
        Ok(best)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}
