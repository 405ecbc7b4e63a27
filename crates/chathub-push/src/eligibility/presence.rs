//! The presence gate: status, do-not-disturb, and active-channel checks.

use chrono::Utc;

use chathub_core::types::id::ChannelId;
use chathub_entity::{
    NotificationReason, PresenceThreshold, Status, UserNotifyProps, UserStatus,
};

/// How long after the last interaction a user still counts as actively
/// viewing their open channel, in milliseconds.
pub const CHANNEL_ACTIVITY_TIMEOUT_MS: i64 = 26_400_000;

/// Decide whether the user's presence allows a push.
///
/// Returns `None` when the push is allowed, otherwise the suppression
/// reason. `channel_id` is the channel the event happened in; pass `None`
/// for checks that are not channel-scoped (cross-channel badge updates),
/// in which case only the presence threshold applies. `is_crt_reply`
/// marks a reply inside a collapsed thread: a user viewing the channel is
/// not necessarily viewing that thread, so the active-channel suppression
/// does not apply.
pub fn status_allows_push(
    notify_props: &UserNotifyProps,
    status: &Status,
    channel_id: Option<ChannelId>,
    is_crt_reply: bool,
) -> Option<NotificationReason> {
    // Do not disturb wins over every other consideration.
    if status.status == UserStatus::DoNotDisturb {
        return Some(NotificationReason::UserStatus);
    }

    match notify_props.push_status {
        PresenceThreshold::Online => {
            let viewing_target = status.active_channel == channel_id;
            let idle_ms = (Utc::now() - status.last_activity_at).num_milliseconds();
            if !viewing_target || idle_ms > CHANNEL_ACTIVITY_TIMEOUT_MS || is_crt_reply {
                None
            } else {
                Some(NotificationReason::UserIsActive)
            }
        }
        PresenceThreshold::Away => match status.status {
            UserStatus::Away | UserStatus::Offline => None,
            _ => Some(NotificationReason::UserIsActive),
        },
        PresenceThreshold::Offline => match status.status {
            UserStatus::Offline => None,
            _ => Some(NotificationReason::UserIsActive),
        },
    }
}
