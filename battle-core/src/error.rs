//! Recoverable errors raised while resolving a command.
//!
//! Every variant leaves the battle untouched: the caller reports the message
//! and asks for another choice.

use thiserror::Error;

use crate::abilities::AbilityId;

/// Error type for rejected commands and abilities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("{actor} needs {required} MP for {ability} but has {available}")]
    InsufficientMp {
        actor: String,
        ability: AbilityId,
        required: i32,
        available: i32,
    },

    #[error("invalid target {target}: {reason}")]
    InvalidTarget { target: String, reason: &'static str },

    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

impl BattleError {
    pub(crate) fn invalid_target(target: impl Into<String>, reason: &'static str) -> Self {
        BattleError::InvalidTarget {
            target: target.into(),
            reason,
        }
    }

    pub(crate) fn invalid_command(message: impl Into<String>) -> Self {
        BattleError::InvalidCommand(message.into())
    }
}
