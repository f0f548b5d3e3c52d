//! Error types for the spantree crate

use thiserror::Error;

/// Main error type for the spantree crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("node count {nodes} is out of range (must be {min}-{max})")]
    InvalidNodeCount {
        nodes: usize,
        min: usize,
        max: usize,
    },

    #[error("invalid weight token '{token}' at position {position}")]
    InvalidWeightToken { token: String, position: usize },

    #[error("weight {value} at position {position} must be finite")]
    NonFiniteWeight { value: f64, position: usize },

    #[error("expected {expected} weights for {nodes} nodes, got {got}")]
    WeightCountMismatch {
        nodes: usize,
        expected: usize,
        got: usize,
    },

    #[error("edge {edge} is out of range (must be below {limit})")]
    EdgeOutOfRange { edge: usize, limit: usize },

    #[error("illegal move: edge {edge} is {status}, expected available")]
    EdgeNotAvailable { edge: usize, status: String },

    #[error("cannot disconnect edge {edge}: it is {status}, expected connected")]
    EdgeNotConnected { edge: usize, status: String },

    #[error("invalid player id {player}")]
    InvalidPlayer { player: i32 },

    #[error("no moves to undo")]
    NoMovesToUndo,

    #[error("undo must target the most recent move: last played edge {last}, got {got}")]
    UndoMismatch { last: usize, got: usize },

    #[error("non-terminal state has no legal actions")]
    NoLegalActions,

    #[error("invalid policy '{input}'. Expected one of: {expected}")]
    ParsePolicy { input: String, expected: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
