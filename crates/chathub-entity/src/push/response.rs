//! The relay's synchronous per-request verdict.

use serde::{Deserialize, Serialize};

/// Relay verdict status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PushStatus {
    /// Delivered (or accepted for delivery).
    Ok,
    /// The device is gone; retire its binding and stop sending to it.
    Remove,
    /// The relay could not process the request.
    Fail,
}

/// The relay's response to a send or ack request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushResponse {
    /// Verdict for this request.
    pub status: PushStatus,
    /// Error detail, present on `FAIL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PushResponse {
    /// An `OK` verdict.
    pub fn ok() -> Self {
        Self {
            status: PushStatus::Ok,
            error: None,
        }
    }

    /// A `REMOVE` verdict.
    pub fn remove() -> Self {
        Self {
            status: PushStatus::Remove,
            error: None,
        }
    }

    /// A `FAIL` verdict with an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: PushStatus::Fail,
            error: Some(message.into()),
        }
    }
}
