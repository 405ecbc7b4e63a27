//! # chathub-entity
//!
//! Domain and wire entities for ChatHub:
//!
//! - Users with typed notification preferences
//! - Channels and per-channel notification overrides
//! - Posts, system message types, and attachments
//! - Sessions with mobile device bindings
//! - User presence status
//! - Push notification wire entities (relay protocol)

pub mod channel;
pub mod post;
pub mod push;
pub mod session;
pub mod status;
pub mod user;

pub use channel::{Channel, ChannelNotifyProps, ChannelType, MarkUnreadLevel};
pub use post::{Attachment, Post, PostType};
pub use push::{
    NotificationReason, PushNotification, PushNotificationAck, PushResponse, PushStatus, PushType,
    ReplyThreadType,
};
pub use session::Session;
pub use status::{Status, UserStatus};
pub use user::{NotifyLevel, PresenceThreshold, User, UserNotifyProps};
