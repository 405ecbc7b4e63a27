//! The push notification wire entity sent to the relay.

use serde::{Deserialize, Serialize};

use chathub_core::types::id::{AckId, ChannelId, PostId, UserId};

/// Wire protocol version accepted by the relay.
pub const PUSH_PROTOCOL_VERSION: &str = "v2";

/// The kind of push notification on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushType {
    /// A new-message alert.
    Message,
    /// Dismiss previously delivered alerts for a conversation.
    Clear,
    /// Silent badge-count refresh.
    UpdateBadge,
    /// Connectivity diagnostic.
    Test,
}

impl PushType {
    /// Converts to string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Message => "message",
            Self::Clear => "clear",
            Self::UpdateBadge => "update_badge",
            Self::Test => "test",
        }
    }
}

/// How the notified post relates to a reply thread the receiver follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyThreadType {
    /// Not a thread reply.
    None,
    /// A reply to a thread the receiver started.
    Root,
    /// A reply to a thread the receiver participated in.
    Any,
    /// A reply tracked under collapsed reply threads.
    CollapsedThread,
}

/// A push notification as sent to the external relay.
///
/// Transient: constructed per event, serialized once, discarded after the
/// HTTP round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushNotification {
    /// Correlation id echoed back by client acknowledgements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack_id: Option<AckId>,
    /// The kind of notification.
    #[serde(rename = "type")]
    pub push_type: PushType,
    /// Wire protocol version.
    pub version: String,
    /// Rendered notification body; empty for silent notifications.
    #[serde(default)]
    pub message: String,
    /// App icon badge count.
    #[serde(default)]
    pub badge: i64,
    /// Set to 1 for silent content-available delivery.
    #[serde(default)]
    pub content_available: i32,
    /// Notification sound, `"none"` to suppress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// The conversation the notification belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    /// Display name of that conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    /// The post that triggered the notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
    /// The thread root, when the trigger was a reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_id: Option<PostId>,
    /// The author of the triggering post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<UserId>,
    /// Display name of the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    /// Whether collapsed reply threads are active for the receiver.
    #[serde(default)]
    pub is_crt_enabled: bool,
    /// Target device, set by the hub per session before dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl PushNotification {
    /// Create an empty notification of the given kind.
    pub fn new(push_type: PushType) -> Self {
        Self {
            ack_id: None,
            push_type,
            version: PUSH_PROTOCOL_VERSION.to_string(),
            message: String::new(),
            badge: 0,
            content_available: 0,
            sound: None,
            channel_id: None,
            channel_name: None,
            post_id: None,
            root_id: None,
            sender_id: None,
            sender_name: None,
            is_crt_enabled: false,
            device_id: None,
        }
    }

    /// Whether the notification carries any deliverable payload at all.
    ///
    /// A notification with no body, no badge, no silent-delivery flag, and
    /// no conversation reference would render as nothing on a device; the
    /// send path rejects it before any network call.
    pub fn is_empty_payload(&self) -> bool {
        self.message.is_empty()
            && self.badge == 0
            && self.content_available == 0
            && self.channel_id.is_none()
            && !matches!(self.push_type, PushType::Test)
    }
}
