//! Error taxonomy for resource operations.
//!
//! # Design
//! One variant per operation so a caller can tell which round trip failed
//! without inspecting the request. Every variant names the resource (and the
//! target id for per-record operations) and carries a `Cause` describing what
//! went wrong on the wire. A create response without an `id` is not an
//! error; the client synthesizes one.

use thiserror::Error;

/// Why a round trip failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Cause {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status outside the accepted set.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be encoded to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),

    /// The host could not complete the round trip.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl Cause {
    pub fn status(&self) -> Option<u16> {
        match self {
            Cause::NotFound => Some(404),
            Cause::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors returned by `ResourceClient` and `ResourcePage` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("failed to fetch {resource}: {cause}")]
    Fetch { resource: String, cause: Cause },

    #[error("failed to create {resource}: {cause}")]
    Create { resource: String, cause: Cause },

    #[error("failed to update {resource}/{id}: {cause}")]
    Update { resource: String, id: u64, cause: Cause },

    #[error("failed to delete {resource}/{id}: {cause}")]
    Delete { resource: String, id: u64, cause: Cause },

    /// Rejected locally before any request was issued.
    #[error("invalid {resource} input: {reason}")]
    Validation { resource: String, reason: String },
}

impl ApiError {
    pub fn resource(&self) -> &str {
        match self {
            ApiError::Fetch { resource, .. }
            | ApiError::Create { resource, .. }
            | ApiError::Update { resource, .. }
            | ApiError::Delete { resource, .. }
            | ApiError::Validation { resource, .. } => resource,
        }
    }

    /// Target id of update/delete failures.
    pub fn id(&self) -> Option<u64> {
        match self {
            ApiError::Update { id, .. } | ApiError::Delete { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn cause(&self) -> Option<&Cause> {
        match self {
            ApiError::Fetch { cause, .. }
            | ApiError::Create { cause, .. }
            | ApiError::Update { cause, .. }
            | ApiError::Delete { cause, .. } => Some(cause),
            ApiError::Validation { .. } => None,
        }
    }

    /// HTTP status of the failed response, if the server answered.
    pub fn status(&self) -> Option<u16> {
        self.cause().and_then(Cause::status)
    }
}
