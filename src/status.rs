use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Outcome codes of the remote graph server protocol.
///
/// The classification helpers live here so that a
/// [`RemoteFailure`](crate::RemoteFailure) can carry a code without
/// interpreting it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
#[serde(try_from = "u16", into = "u16")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatusCode {
    Success,
    NoContent,
    PartialContent,
    Unauthorized,
    Forbidden,
    Authenticate,
    MalformedRequest,
    InvalidRequestArguments,
    ServerError,
    ServerErrorFailStep,
    ServerErrorTemporary,
    ServerErrorEvaluation,
    ServerErrorTimeout,
    ServerErrorSerialization,
}

impl ResponseStatusCode {
    pub fn code(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::NoContent => 204,
            Self::PartialContent => 206,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::Authenticate => 407,
            Self::MalformedRequest => 498,
            Self::InvalidRequestArguments => 499,
            Self::ServerError => 500,
            Self::ServerErrorFailStep => 595,
            Self::ServerErrorTemporary => 596,
            Self::ServerErrorEvaluation => 597,
            Self::ServerErrorTimeout => 598,
            Self::ServerErrorSerialization => 599,
        }
    }

    pub fn from_code(code: u16) -> Result<Self, Error> {
        match code {
            200 => Ok(Self::Success),
            204 => Ok(Self::NoContent),
            206 => Ok(Self::PartialContent),
            401 => Ok(Self::Unauthorized),
            403 => Ok(Self::Forbidden),
            407 => Ok(Self::Authenticate),
            498 => Ok(Self::MalformedRequest),
            499 => Ok(Self::InvalidRequestArguments),
            500 => Ok(Self::ServerError),
            595 => Ok(Self::ServerErrorFailStep),
            596 => Ok(Self::ServerErrorTemporary),
            597 => Ok(Self::ServerErrorEvaluation),
            598 => Ok(Self::ServerErrorTimeout),
            599 => Ok(Self::ServerErrorSerialization),
            _ => Err(Error::UnknownStatusCode { code }),
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::NoContent | Self::PartialContent)
    }

    /// Whether no further responses follow for the request. Only
    /// `PartialContent` announces more.
    pub fn is_final_response(self) -> bool {
        self != Self::PartialContent
    }

    pub fn is_client_error(self) -> bool {
        (400..500).contains(&self.code())
    }

    pub fn is_server_error(self) -> bool {
        self.code() >= 500
    }

    /// The server flagged the failure as transient; the same request may
    /// succeed if sent again.
    pub fn is_retryable(self) -> bool {
        self == Self::ServerErrorTemporary
    }
}

impl TryFrom<u16> for ResponseStatusCode {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<ResponseStatusCode> for u16 {
    fn from(status: ResponseStatusCode) -> Self {
        status.code()
    }
}
