//! Session entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use chathub_core::types::id::{SessionId, UserId};

/// An active user session.
///
/// A session created from a mobile client carries a device binding, the
/// `"platform:token"` identifier the push relay delivers to. The binding
/// is cleared (the session itself survives) when the relay reports the
/// device as gone; only the push hub performs that mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: SessionId,
    /// The user this session belongs to.
    pub user_id: UserId,
    /// Mobile device identifier, if this is a mobile session.
    #[serde(default)]
    pub device_id: Option<String>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the session expires (absolute timeout).
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for the given user, valid for `ttl`.
    pub fn new(user_id: UserId, device_id: Option<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            user_id,
            device_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// The device to push to, if the session is unexpired and still bound.
    pub fn active_device_id(&self) -> Option<&str> {
        if self.is_expired() {
            return None;
        }
        self.device_id.as_deref()
    }
}
