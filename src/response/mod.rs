pub mod failure;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::status::ResponseStatusCode;

pub use failure::{Attributes, RemoteFailure};

/// Status attribute carrying the remote exception class names.
pub const STATUS_ATTRIBUTE_EXCEPTIONS: &str = "exceptions";
/// Status attribute carrying the remote stack trace text.
pub const STATUS_ATTRIBUTE_STACK_TRACE: &str = "stackTrace";

/// Outcome block of a server response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseStatus {
    pub code: ResponseStatusCode,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

/// A decoded server response as handed over by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl ResponseMessage {
    pub fn success(result: serde_json::Value) -> Self {
        Self {
            request_id: None,
            status: ResponseStatus {
                code: ResponseStatusCode::Success,
                message: String::new(),
                attributes: None,
            },
            result: Some(result),
        }
    }

    pub fn failure(code: ResponseStatusCode, message: impl Into<String>) -> Self {
        Self {
            request_id: None,
            status: ResponseStatus {
                code,
                message: message.into(),
                attributes: None,
            },
            result: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_status_attributes(mut self, attributes: Attributes) -> Self {
        self.status.attributes = Some(attributes);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_success(&self) -> bool {
        self.status.code.is_success()
    }

    /// Splits on the status code: success passes the message through, any
    /// other code becomes a [`RemoteFailure`] built from the status block.
    pub fn into_result(self) -> Result<Self, RemoteFailure> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RemoteFailure::from_status(self.status))
        }
    }
}
