//! Host-side executor seam.
//!
//! The core never opens a socket. A `Transport` takes a built `HttpRequest`
//! and returns the server's `HttpResponse`; any status code, including 4xx
//! and 5xx, is a response rather than an error. `TransportError` is reserved
//! for round trips that produced no response at all.

use thiserror::Error;

use crate::http::{HttpRequest, HttpResponse};

/// The round trip could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Executes HTTP requests on behalf of `ResourceClient`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
