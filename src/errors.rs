// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Errors for the sharing phase.
//!
//! Only precondition violations are errors. Relay rejections, IC conflicts
//! and failed verifications are protocol outcomes and are reported through
//! return values and participant state instead.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WssError {
    #[error("threshold {threshold} exceeds the number of players {players}")]
    ThresholdExceedsPlayers { threshold: usize, players: usize },

    #[error("polynomial degree must be at least 1, got {0}")]
    DegreeTooSmall(usize),

    #[error("participant id {0} appears more than once in the round")]
    DuplicateParticipant(usize),

    #[error(
        "no ICSetup state for dealer {dealer}, intermediary {intermediary}, receiver {receiver}"
    )]
    MissingSetup {
        dealer: usize,
        intermediary: usize,
        receiver: usize,
    },

    #[error(
        "share does not match the one set up for intermediary {intermediary}, receiver {receiver}"
    )]
    ShareMismatch { intermediary: usize, receiver: usize },

    #[error("invalid group parameters: {0}")]
    InvalidParameters(String),
}

pub type Result<T> = std::result::Result<T, WssError>;
