//! User-level push notification preferences.

use serde::{Deserialize, Serialize};

/// Which events trigger a push notification.
///
/// `Default` is only meaningful as a channel-level value, where it defers
/// to the user-level setting. A user-level `Default` is treated as
/// `Mention` when resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyLevel {
    /// Notify for every message.
    All,
    /// Notify only when explicitly mentioned.
    Mention,
    /// Never notify.
    None,
    /// Defer to the user-level setting.
    Default,
}

impl NotifyLevel {
    /// Parses from a string with a default fallback.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "all" => Self::All,
            "mention" => Self::Mention,
            "none" => Self::None,
            _ => Self::Default,
        }
    }

    /// Converts to string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Mention => "mention",
            Self::None => "none",
            Self::Default => "default",
        }
    }
}

/// The presence level at which a user considers themselves "already here"
/// and does not want to be paged.
///
/// `Online` means "notify me unless I am online", `Away` means "notify me
/// only if I am away or offline", `Offline` means "only when offline".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceThreshold {
    /// Suppress only while actively online.
    Online,
    /// Suppress while online; deliver when away or offline.
    Away,
    /// Deliver only while offline.
    Offline,
}

impl PresenceThreshold {
    /// Parses from a string with a default fallback.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "away" => Self::Away,
            "offline" => Self::Offline,
            _ => Self::Online,
        }
    }

    /// Converts to string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => "online",
            Self::Away => "away",
            Self::Offline => "offline",
        }
    }
}

/// A user's notification preference set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserNotifyProps {
    /// Push notification level.
    #[serde(default = "default_push_level")]
    pub push: NotifyLevel,
    /// Presence threshold for push delivery.
    #[serde(default = "default_push_status")]
    pub push_status: PresenceThreshold,
}

impl Default for UserNotifyProps {
    fn default() -> Self {
        Self {
            push: default_push_level(),
            push_status: default_push_status(),
        }
    }
}

fn default_push_level() -> NotifyLevel {
    NotifyLevel::Mention
}

fn default_push_status() -> PresenceThreshold {
    PresenceThreshold::Online
}
