//! The preference gate: notify levels, mutes, and system messages.

use chathub_entity::{ChannelNotifyProps, NotificationReason, NotifyLevel, Post, User};

/// Resolve the level that actually governs this channel for this user.
///
/// A channel-level setting wins unless it is absent or `Default`. Group
/// messages resolve the user-level fallback through their own table: a
/// user-level `Mention` becomes `All` (GMs page on every message unless
/// explicitly silenced), while a user-level `None` stays `None`. This
/// asymmetry is intentional product policy, not a derived rule.
fn effective_level(
    user_level: NotifyLevel,
    channel_level: Option<NotifyLevel>,
    is_gm: bool,
) -> NotifyLevel {
    if let Some(level) = channel_level {
        if level != NotifyLevel::Default {
            return level;
        }
    }
    let user_level = match user_level {
        NotifyLevel::Default => NotifyLevel::Mention,
        level => level,
    };
    match user_level {
        NotifyLevel::Mention if is_gm => NotifyLevel::All,
        level => level,
    }
}

/// Decide whether notify preferences allow a push for this post.
///
/// Returns `None` when the push is allowed, otherwise the suppression
/// reason. Evaluated in priority order: system message, effective level
/// `None`, channel mute, mention requirement.
pub fn notify_props_allow_push(
    user: &User,
    channel_notify_props: &ChannelNotifyProps,
    post: &Post,
    was_mentioned: bool,
    is_gm: bool,
) -> Option<NotificationReason> {
    // System messages never page a user, even on explicit mention.
    if post.is_system_message() {
        return Some(NotificationReason::SystemMessage);
    }

    let level = effective_level(user.notify_props.push, channel_notify_props.push, is_gm);

    if level == NotifyLevel::None {
        return Some(NotificationReason::LevelSetToNone);
    }

    // Muting overrides any non-None level.
    if channel_notify_props.is_muted() {
        return Some(NotificationReason::ChannelMuted);
    }

    if level == NotifyLevel::Mention && !was_mentioned {
        return Some(NotificationReason::NotMentioned);
    }

    None
}
