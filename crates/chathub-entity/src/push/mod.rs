//! Push relay wire entities and notification verdict types.

pub mod ack;
pub mod notification;
pub mod reason;
pub mod response;

pub use ack::PushNotificationAck;
pub use notification::{PushNotification, PushType, ReplyThreadType};
pub use reason::NotificationReason;
pub use response::{PushResponse, PushStatus};
