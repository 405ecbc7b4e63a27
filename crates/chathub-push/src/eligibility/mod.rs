//! Push eligibility gates.
//!
//! Two independent pure gates must both allow a push: the preference gate
//! ([`notify_props_allow_push`]) and the presence gate
//! ([`status_allows_push`]). Each returns `Option<NotificationReason>`;
//! `None` is the only "send" verdict. A post carrying the
//! force-notification prop bypasses both gates.

pub mod preference;
pub mod presence;

pub use preference::notify_props_allow_push;
pub use presence::status_allows_push;

use chathub_entity::{ChannelNotifyProps, Post, Status, User};

/// The combined caller-facing verdict for an ordinary post notification.
///
/// Force-notification posts are always sent; otherwise both gates must
/// allow. The presence gate is evaluated against the post's channel with
/// no thread-reply exception (thread-reply checks call the gates
/// directly).
pub fn should_send_push_notification(
    user: &User,
    channel_notify_props: &ChannelNotifyProps,
    was_mentioned: bool,
    status: &Status,
    post: &Post,
    is_gm: bool,
) -> bool {
    if post.is_force_notification() {
        return true;
    }

    notify_props_allow_push(user, channel_notify_props, post, was_mentioned, is_gm).is_none()
        && status_allows_push(
            &user.notify_props,
            status,
            Some(post.channel_id),
            false,
        )
        .is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chathub_core::types::id::ChannelId;
    use chathub_entity::{MarkUnreadLevel, NotifyLevel, UserStatus};

    #[test]
    fn test_force_notification_bypasses_both_gates() {
        let mut user = User::new("receiver");
        user.notify_props.push = NotifyLevel::None;

        let mut post = Post::new(user.id, ChannelId::new(), "urgent");
        post.props.force_notification = true;

        // muted channel, push level none, user actively viewing the channel
        let channel_props = ChannelNotifyProps {
            push: Some(NotifyLevel::None),
            mark_unread: MarkUnreadLevel::Mention,
        };
        let mut status = Status::new(user.id, UserStatus::Online);
        status.active_channel = Some(post.channel_id);

        assert!(should_send_push_notification(
            &user,
            &channel_props,
            false,
            &status,
            &post,
            false
        ));
    }

    #[test]
    fn test_without_force_the_same_setup_is_suppressed() {
        let mut user = User::new("receiver");
        user.notify_props.push = NotifyLevel::None;

        let post = Post::new(user.id, ChannelId::new(), "urgent");

        let channel_props = ChannelNotifyProps {
            push: Some(NotifyLevel::None),
            mark_unread: MarkUnreadLevel::Mention,
        };
        let mut status = Status::new(user.id, UserStatus::Online);
        status.active_channel = Some(post.channel_id);

        assert!(!should_send_push_notification(
            &user,
            &channel_props,
            false,
            &status,
            &post,
            false
        ));
    }
}
