use thiserror::Error;

/// Errors surfaced at construction/serialization boundaries.
///
/// In-game misuse (acting without a raid, advancing the turn from the wrong
/// state, and so on) is deliberately *not* an error: those calls are silent
/// no-ops so a confused caller can never corrupt the simulation.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
