//! Lifecycle of a single page operation.

use crate::error::ApiError;

/// `Idle -> InFlight -> {Succeeded, Failed}`; both outcomes are terminal
/// until the next operation starts.
#[derive(Debug, Clone, PartialEq)]
pub enum OpState<T> {
    Idle,
    InFlight,
    Succeeded(T),
    Failed(ApiError),
}

impl<T> Default for OpState<T> {
    fn default() -> Self {
        OpState::Idle
    }
}

impl<T> OpState<T> {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, OpState::InFlight)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            OpState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            OpState::Succeeded(v) => Some(v),
            _ => None,
        }
    }
}

/// What a finished page operation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Listed(usize),
    Created(T),
    Updated(T),
    Deleted(u64),
}
