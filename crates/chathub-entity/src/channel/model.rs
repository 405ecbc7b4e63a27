//! Channel entity model.

use serde::{Deserialize, Serialize};

use chathub_core::types::id::ChannelId;

/// The kind of conversation a channel holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// Public channel, joinable by anyone on the team.
    Open,
    /// Private channel, invite only.
    Private,
    /// Group message between three or more users, no public discovery.
    Group,
    /// One-to-one direct message.
    Direct,
}

impl ChannelType {
    /// Whether this is a group message channel.
    pub fn is_group_message(&self) -> bool {
        matches!(self, Self::Group)
    }

    /// Whether this is a one-to-one direct message channel.
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Direct)
    }
}

/// A conversation channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Unique channel identifier.
    pub id: ChannelId,
    /// The kind of channel.
    pub channel_type: ChannelType,
    /// URL-safe channel name.
    pub name: String,
    /// Human-readable display name.
    pub display_name: String,
}

impl Channel {
    /// Create a channel of the given type with a generated id.
    pub fn new(channel_type: ChannelType, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: ChannelId::new(),
            channel_type,
            display_name: name.clone(),
            name,
        }
    }
}
