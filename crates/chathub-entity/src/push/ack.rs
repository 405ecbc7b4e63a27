//! Client-reported push delivery acknowledgement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chathub_core::types::id::{AckId, PostId};

use super::notification::PushType;

/// A delivery acknowledgement observed by a mobile client, forwarded to
/// the relay for delivery analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushNotificationAck {
    /// The ack id the original notification carried.
    pub id: AckId,
    /// The kind of the acknowledged notification.
    pub notification_type: PushType,
    /// The post the notification was about, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
    /// What the user did with the notification, as reported by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_action_type: Option<String>,
    /// When the client observed the delivery.
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
}

impl PushNotificationAck {
    /// An acknowledgement for a notification of the given kind, received now.
    pub fn new(id: AckId, notification_type: PushType) -> Self {
        Self {
            id,
            notification_type,
            post_id: None,
            user_action_type: None,
            received_at: Some(Utc::now()),
        }
    }
}
