//! Notification body composition under content-visibility policy.

use chathub_core::config::push::PushContents;
use chathub_entity::{Attachment, ChannelType, ReplyThreadType};

use super::catalog::{MessageCatalog, MessageKey};

/// Compose the notification body for a post.
///
/// `message` is the (already mention-rewritten) post text. Under the
/// generic policies the text is never revealed; direct channels collapse
/// every generic branch except file attachments to "sent you a message."
/// because the recipient is always the addressee. Inputs are never
/// mutated.
#[allow(clippy::too_many_arguments)]
pub fn compose_push_message(
    contents: PushContents,
    message: &str,
    explicit_mention: bool,
    channel_wide_mention: bool,
    has_files: bool,
    sender_name: &str,
    channel_type: ChannelType,
    reply_type: ReplyThreadType,
    catalog: &dyn MessageCatalog,
) -> String {
    // A post with files and no text reads the same under every policy.
    if message.is_empty() && has_files {
        if channel_type.is_direct() {
            return catalog.phrase(MessageKey::AttachedAFile).to_string();
        }
        return format!("{sender_name} {}", catalog.phrase(MessageKey::AttachedAFile));
    }

    if contents == PushContents::Full {
        // A collapsed-thread reply can span multiple participants, so the
        // sender prefix comes back even in a direct channel.
        if channel_type.is_direct() && reply_type != ReplyThreadType::CollapsedThread {
            return message.to_string();
        }
        return format!("{sender_name}: {message}");
    }

    if channel_type.is_direct() {
        return catalog.phrase(MessageKey::SentYouAMessage).to_string();
    }

    let key = if explicit_mention {
        MessageKey::MentionedYou
    } else if channel_wide_mention {
        MessageKey::NotifiedTheChannel
    } else {
        match reply_type {
            ReplyThreadType::Root => MessageKey::CommentedOnYourPost,
            ReplyThreadType::Any => MessageKey::CommentedOnThread,
            _ => MessageKey::PostedAMessage,
        }
    };
    format!("{sender_name} {}", catalog.phrase(key))
}

/// Append each attachment's fallback line to the rendered body.
///
/// Returns a new string; the post's attachments are read-only here.
pub fn append_attachment_fallbacks(message: String, attachments: &[Attachment]) -> String {
    let mut out = message;
    for attachment in attachments {
        if !attachment.fallback.is_empty() {
            out.push('\n');
            out.push_str(&attachment.fallback);
        }
    }
    out
}
