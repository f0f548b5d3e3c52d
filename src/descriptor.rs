//! Game object, construction parameters, and host registration metadata
//!
//! A host framework constructs the game from [`GameParams`], reads the
//! data-only [`GameDescriptor`] at registration time, and mints fresh
//! episodes through [`SpanningTreeGame::new_initial_state`].

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    spanning::{EDGE_STATE_PLANES, GraphState, TreeState},
};

/// Registered default for the node count
pub const DEFAULT_NUM_NODES: usize = 1;
/// Registered default for the weight table
pub const DEFAULT_WEIGHTS: &str = "0";

/// Construction parameters as supplied by a host framework
///
/// `weights` is a comma-separated list of real numbers of length
/// `num_nodes * num_nodes`, row-major by `(row, column)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameParams {
    pub num_nodes: usize,
    pub weights: String,
}

impl Default for GameParams {
    fn default() -> Self {
        GameParams {
            num_nodes: DEFAULT_NUM_NODES,
            weights: DEFAULT_WEIGHTS.to_string(),
        }
    }
}

/// Parse a comma-separated weight list.
///
/// # Errors
///
/// Returns error on the first token that does not parse as a finite real,
/// identifying the token and its position.
pub fn parse_weights(values: &str) -> Result<Vec<f64>> {
    let mut weights = Vec::new();
    for (position, token) in values.split(',').enumerate() {
        let trimmed = token.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| Error::InvalidWeightToken {
                token: trimmed.to_string(),
                position,
            })?;
        if !value.is_finite() {
            return Err(Error::NonFiniteWeight { value, position });
        }
        weights.push(value);
    }
    Ok(weights)
}

/// One declared construction parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub default_value: &'static str,
}

/// Declarative registration metadata for a game-playing host.
///
/// Data only; it carries no behavior and is shared by every game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameDescriptor {
    pub short_name: &'static str,
    pub long_name: &'static str,
    pub dynamics: &'static str,
    pub chance_mode: &'static str,
    pub information: &'static str,
    pub utility: &'static str,
    pub reward_model: &'static str,
    pub min_players: usize,
    pub max_players: usize,
    pub provides_information_state: bool,
    pub provides_observation: bool,
    pub provides_observation_tensor: bool,
    pub parameters: &'static [ParameterSpec],
}

/// The descriptor registered for this game
pub const GAME_DESCRIPTOR: GameDescriptor = GameDescriptor {
    short_name: "spanning_tree",
    long_name: "Spanning Tree Construction",
    dynamics: "sequential",
    chance_mode: "deterministic",
    information: "perfect",
    utility: "identical",
    reward_model: "terminal",
    min_players: 1,
    max_players: 1,
    provides_information_state: true,
    provides_observation: true,
    provides_observation_tensor: true,
    parameters: &[
        ParameterSpec {
            name: "num_nodes",
            default_value: "1",
        },
        ParameterSpec {
            name: "weights",
            default_value: DEFAULT_WEIGHTS,
        },
    ],
};

/// A configured game, ready to mint fresh episodes
///
/// Parameters are validated once at construction; every
/// [`SpanningTreeGame::new_initial_state`] call reuses them without
/// re-validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningTreeGame {
    num_nodes: usize,
    weights: Vec<f64>,
}

impl SpanningTreeGame {
    /// Build a game from host-supplied parameters.
    ///
    /// # Errors
    ///
    /// Returns error if the weight string is malformed, the node count is
    /// out of range, or the weight count does not equal `num_nodes^2`.
    pub fn from_params(params: &GameParams) -> Result<Self> {
        let weights = parse_weights(&params.weights)?;
        Self::new(params.num_nodes, weights)
    }

    /// Build a game from an already-parsed weight table.
    ///
    /// # Errors
    ///
    /// Returns error under the same conditions as [`GraphState::new`].
    pub fn new(num_nodes: usize, weights: Vec<f64>) -> Result<Self> {
        GraphState::validate(num_nodes, &weights)?;
        Ok(SpanningTreeGame { num_nodes, weights })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn num_players(&self) -> usize {
        1
    }

    /// One distinct action per matrix cell
    pub fn num_distinct_actions(&self) -> usize {
        self.num_nodes * self.num_nodes
    }

    pub fn max_game_length(&self) -> usize {
        self.num_nodes * self.num_nodes
    }

    /// Tensor shape of [`TreeState::observation_tensor`]
    pub fn observation_tensor_shape(&self) -> [usize; 3] {
        [EDGE_STATE_PLANES, self.num_nodes, self.num_nodes]
    }

    pub fn min_utility(&self) -> f64 {
        -1.0
    }

    pub fn max_utility(&self) -> f64 {
        1.0
    }

    pub fn utility_sum(&self) -> f64 {
        0.0
    }

    /// Start a fresh episode with this game's node count and weights.
    pub fn new_initial_state(&self) -> TreeState {
        TreeState::from_graph(GraphState::new_unchecked(
            self.num_nodes,
            self.weights.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weights() {
        assert_eq!(parse_weights("0").unwrap(), vec![0.0]);
        assert_eq!(
            parse_weights("0.0, 1.5,-2.25,3").unwrap(),
            vec![0.0, 1.5, -2.25, 3.0]
        );
    }

    #[test]
    fn test_parse_weights_reports_bad_token() {
        let result = parse_weights("0.0,oops,1.0");
        match result {
            Err(Error::InvalidWeightToken { token, position }) => {
                assert_eq!(token, "oops");
                assert_eq!(position, 1);
            }
            other => panic!("expected InvalidWeightToken, got {other:?}"),
        }

        assert!(matches!(
            parse_weights("1.0,inf"),
            Err(Error::NonFiniteWeight { position: 1, .. })
        ));
        assert!(parse_weights("").is_err());
    }

    #[test]
    fn test_default_params_build_the_trivial_game() {
        let game = SpanningTreeGame::from_params(&GameParams::default()).unwrap();
        assert_eq!(game.num_nodes(), 1);
        assert_eq!(game.num_distinct_actions(), 1);
        assert!(game.new_initial_state().is_terminal());
    }

    #[test]
    fn test_from_params_validates_dimensions() {
        let params = GameParams {
            num_nodes: 3,
            weights: "0,1,2,3".to_string(),
        };
        assert!(matches!(
            SpanningTreeGame::from_params(&params),
            Err(Error::WeightCountMismatch {
                expected: 9,
                got: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_game_accessors() {
        let game = SpanningTreeGame::new(4, vec![0.0; 16]).unwrap();
        assert_eq!(game.num_players(), 1);
        assert_eq!(game.num_distinct_actions(), 16);
        assert_eq!(game.max_game_length(), 16);
        assert_eq!(game.observation_tensor_shape(), [3, 4, 4]);
        assert_eq!(game.min_utility(), -1.0);
        assert_eq!(game.max_utility(), 1.0);
        assert_eq!(game.utility_sum(), 0.0);
    }

    #[test]
    fn test_initial_states_are_independent() {
        let game = SpanningTreeGame::new(3, vec![0.0; 9]).unwrap();
        let mut first = game.new_initial_state();
        let second = game.new_initial_state();

        first.apply(1).unwrap();
        assert_eq!(second.move_count(), 0);
        assert_eq!(second.legal_actions().len(), 6);
    }

    #[test]
    fn test_descriptor_metadata() {
        assert_eq!(GAME_DESCRIPTOR.short_name, "spanning_tree");
        assert_eq!(GAME_DESCRIPTOR.min_players, 1);
        assert_eq!(GAME_DESCRIPTOR.max_players, 1);
        assert_eq!(GAME_DESCRIPTOR.parameters.len(), 2);
        assert_eq!(GAME_DESCRIPTOR.parameters[0].name, "num_nodes");
    }
}
