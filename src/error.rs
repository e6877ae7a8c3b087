use blackjack::{ConfigError, ShoeError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0}")]
    Shoe(#[from] ShoeError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The round hit a fatal shoe error and must be reset before play resumes.
    #[error("Round aborted; reset the game to continue")]
    RoundAborted,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{collaborator} failed: {reason}")]
pub struct CollaboratorError {
    pub collaborator: String,
    pub reason: String,
}

impl CollaboratorError {
    pub fn new(collaborator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            collaborator: collaborator.into(),
            reason: reason.into(),
        }
    }
}
