//! Presence status model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chathub_core::types::id::{ChannelId, UserId};

/// User presence status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// User is connected and recently active.
    Online,
    /// User is connected but idle, or has marked themselves away.
    Away,
    /// User is not connected.
    Offline,
    /// Do not disturb.
    #[serde(rename = "dnd")]
    DoNotDisturb,
}

impl UserStatus {
    /// Parses from a string with a default fallback.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "online" => Self::Online,
            "away" => Self::Away,
            "dnd" | "do_not_disturb" => Self::DoNotDisturb,
            _ => Self::Offline,
        }
    }

    /// Converts to string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => "online",
            Self::Away => "away",
            Self::Offline => "offline",
            Self::DoNotDisturb => "dnd",
        }
    }
}

/// A user's current presence snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    /// The user this status belongs to.
    pub user_id: UserId,
    /// Current presence status.
    pub status: UserStatus,
    /// Whether the status was set manually rather than inferred.
    pub manual: bool,
    /// Last time the user interacted with any client.
    pub last_activity_at: DateTime<Utc>,
    /// The channel the user currently has open, if any.
    #[serde(default)]
    pub active_channel: Option<ChannelId>,
}

impl Status {
    /// A fresh status snapshot with activity recorded now.
    pub fn new(user_id: UserId, status: UserStatus) -> Self {
        Self {
            user_id,
            status,
            manual: false,
            last_activity_at: Utc::now(),
            active_channel: None,
        }
    }
}
