//! The boundary between this crate and a transport that talks to the server.
//!
//! Two failure kinds stay apart all the way to the caller:
//!
//! - [`TransportError`]: nothing came back from the server (connection,
//!   serialization, timeout).
//! - [`RemoteFailure`]: the server ran the request and reported an error.
//!
//! [`ClientError`] wraps both so callers can match on the variant instead of
//! digging through fields.

use std::time::Duration;

use thiserror::Error;

use crate::bytecode::Bytecode;
use crate::response::{RemoteFailure, ResponseMessage};
use crate::status::ResponseStatusCode;

/// Failures raised before a server-side outcome exists.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not reach the server
    #[error("Connection failed to {endpoint}: {reason}")]
    ConnectionFailed { endpoint: String, reason: String },

    /// Request could not be encoded or the response could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No response within the allotted time
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Connection was closed while the request was in flight
    #[error("Connection closed")]
    Closed,
}

impl TransportError {
    pub fn connection_failed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        TransportError::ConnectionFailed {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is retryable (transient failure)
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::ConnectionFailed { .. }
            | TransportError::Timeout(_)
            | TransportError::Closed => true,
            TransportError::Serialization(_) => false,
        }
    }
}

/// Everything that can go wrong submitting bytecode.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a server-side outcome
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server executed the request and reported failure
    #[error(transparent)]
    Remote(#[from] RemoteFailure),
}

impl ClientError {
    /// Status code reported by the server, if the failure came from it.
    pub fn status_code(&self) -> Option<ResponseStatusCode> {
        match self {
            ClientError::Remote(failure) => Some(failure.status_code()),
            ClientError::Transport(_) => None,
        }
    }

    pub fn remote(&self) -> Option<&RemoteFailure> {
        match self {
            ClientError::Remote(failure) => Some(failure),
            ClientError::Transport(_) => None,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(e) => e.is_retryable(),
            ClientError::Remote(failure) => failure.status_code().is_retryable(),
        }
    }
}

/// Serializes bytecode, sends it and decodes the reply.
///
/// Connection lifecycle, retries and cancellation belong to the implementor.
pub trait Transport {
    fn submit(&self, bytecode: &Bytecode) -> Result<ResponseMessage, TransportError>;
}

/// Sends `bytecode` and splits the outcome into success, transport failure or
/// remote failure. A failed status is converted once and returned unchanged.
pub fn submit<T>(transport: &T, bytecode: &Bytecode) -> Result<ResponseMessage, ClientError>
where
    T: Transport + ?Sized,
{
    let response = transport
        .submit(bytecode)
        .inspect_err(|e| tracing::debug!(%bytecode, error = %e, "transport failed"))?;
    Ok(response.into_result()?)
}
