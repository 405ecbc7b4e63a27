//! Per-channel notification overrides a member has configured.

use serde::{Deserialize, Serialize};

use crate::user::NotifyLevel;

/// Which messages mark the channel unread for this member.
///
/// A channel whose mark-unread level is `Mention` is a muted channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkUnreadLevel {
    /// Every message marks the channel unread.
    All,
    /// Only mentions mark the channel unread (muted).
    Mention,
}

/// A member's notification overrides for one channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelNotifyProps {
    /// Channel-level push override. `None` behaves as [`NotifyLevel::Default`].
    #[serde(default)]
    pub push: Option<NotifyLevel>,
    /// Mark-unread level; `Mention` means the channel is muted.
    #[serde(default = "default_mark_unread")]
    pub mark_unread: MarkUnreadLevel,
}

impl ChannelNotifyProps {
    /// Whether the member has muted this channel.
    pub fn is_muted(&self) -> bool {
        self.mark_unread == MarkUnreadLevel::Mention
    }
}

impl Default for ChannelNotifyProps {
    fn default() -> Self {
        Self {
            push: None,
            mark_unread: default_mark_unread(),
        }
    }
}

fn default_mark_unread() -> MarkUnreadLevel {
    MarkUnreadLevel::All
}
