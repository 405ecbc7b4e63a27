//! Localizable notification phrases.
//!
//! Locale lookup is an external collaborator; the composer only talks to
//! the [`MessageCatalog`] trait. Adding a key forces every catalog to
//! supply a phrase for it.

/// Keys for every generic notification phrase the composer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// Direct-message body when content is withheld.
    SentYouAMessage,
    /// File upload with no message text; prefixed with the sender outside
    /// direct channels.
    AttachedAFile,
    /// The sender explicitly mentioned the receiver.
    MentionedYou,
    /// The sender used a channel-wide mention.
    NotifiedTheChannel,
    /// The sender replied to a thread the receiver started.
    CommentedOnYourPost,
    /// The sender replied to a thread the receiver participated in.
    CommentedOnThread,
    /// Fallback phrase for any other message.
    PostedAMessage,
}

/// Source of user-facing notification phrases for one locale.
pub trait MessageCatalog: Send + Sync {
    /// The phrase for the given key.
    fn phrase(&self, key: MessageKey) -> &str;
}

/// The built-in English catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl MessageCatalog for EnglishCatalog {
    fn phrase(&self, key: MessageKey) -> &str {
        match key {
            MessageKey::SentYouAMessage => "sent you a message.",
            MessageKey::AttachedAFile => "attached a file.",
            MessageKey::MentionedYou => "mentioned you.",
            MessageKey::NotifiedTheChannel => "notified the channel.",
            MessageKey::CommentedOnYourPost => "commented on your post.",
            MessageKey::CommentedOnThread => "commented on a thread you participated in.",
            MessageKey::PostedAMessage => "posted a message.",
        }
    }
}
