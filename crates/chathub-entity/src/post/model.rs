//! Post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chathub_core::types::id::{ChannelId, FileId, PostId, UserId};

use super::attachment::Attachment;

/// The kind of post; anything other than `Ordinary` is a system message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    /// A regular user message.
    Ordinary,
    /// System message: a user joined the channel.
    JoinChannel,
    /// System message: a user left the channel.
    LeaveChannel,
    /// System message: a user was added to the channel.
    AddToChannel,
    /// System message: a user was removed from the channel.
    RemoveFromChannel,
    /// System message: the channel header changed.
    HeaderChange,
}

impl PostType {
    /// Whether this post was generated by the system rather than a user.
    pub fn is_system(&self) -> bool {
        !matches!(self, Self::Ordinary)
    }
}

impl Default for PostType {
    fn default() -> Self {
        Self::Ordinary
    }
}

/// Free-form post properties that ride along with the message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostProps {
    /// When set, the post bypasses every notification suppression rule.
    #[serde(default)]
    pub force_notification: bool,
    /// Rich attachments on the post.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// A message posted to a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique post identifier.
    pub id: PostId,
    /// The author of the post.
    pub user_id: UserId,
    /// The channel the post was made in.
    pub channel_id: ChannelId,
    /// The root post of the thread, if this post is a reply.
    #[serde(default)]
    pub root_id: Option<PostId>,
    /// Message text.
    #[serde(default)]
    pub message: String,
    /// The kind of post.
    #[serde(default)]
    pub post_type: PostType,
    /// Files uploaded with the post.
    #[serde(default)]
    pub file_ids: Vec<FileId>,
    /// Free-form properties.
    #[serde(default)]
    pub props: PostProps,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create an ordinary post in the given channel.
    pub fn new(user_id: UserId, channel_id: ChannelId, message: impl Into<String>) -> Self {
        Self {
            id: PostId::new(),
            user_id,
            channel_id,
            root_id: None,
            message: message.into(),
            post_type: PostType::Ordinary,
            file_ids: Vec::new(),
            props: PostProps::default(),
            created_at: Utc::now(),
        }
    }

    /// Whether this post was generated by the system.
    pub fn is_system_message(&self) -> bool {
        self.post_type.is_system()
    }

    /// Whether this post demands delivery regardless of preferences.
    pub fn is_force_notification(&self) -> bool {
        self.props.force_notification
    }

    /// Whether the post carries uploaded files.
    pub fn has_files(&self) -> bool {
        !self.file_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_message() {
        let mut post = Post::new(UserId::new(), ChannelId::new(), "hi");
        assert!(!post.is_system_message());
        post.post_type = PostType::JoinChannel;
        assert!(post.is_system_message());
    }

    #[test]
    fn test_force_notification_default_off() {
        let post = Post::new(UserId::new(), ChannelId::new(), "hi");
        assert!(!post.is_force_notification());
    }
}
