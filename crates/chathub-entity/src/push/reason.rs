//! Typed suppression reasons produced by the eligibility gates.

use serde::{Deserialize, Serialize};

/// Why a push notification was suppressed.
///
/// The gates return `Option<NotificationReason>`: `None` is the only value
/// that means "send". A reason is advisory and diagnostic, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationReason {
    /// The post is a system message; those never page a user.
    SystemMessage,
    /// The effective level is mention-only and the user was not mentioned.
    NotMentioned,
    /// The effective notify level is `None`.
    LevelSetToNone,
    /// The user has muted the channel.
    ChannelMuted,
    /// The user is present enough (or viewing the channel) already.
    UserIsActive,
    /// The user's status forbids interruption (do not disturb).
    UserStatus,
}

impl NotificationReason {
    /// Converts to string, for log fields.
    pub fn as_str(&self) -> &str {
        match self {
            Self::SystemMessage => "system_message",
            Self::NotMentioned => "not_mentioned",
            Self::LevelSetToNone => "level_set_to_none",
            Self::ChannelMuted => "channel_muted",
            Self::UserIsActive => "user_is_active",
            Self::UserStatus => "user_status",
        }
    }
}
