//! Message attachment model.

use serde::{Deserialize, Serialize};

/// A rich attachment rendered below a post.
///
/// Clients that cannot render the attachment body show `fallback` instead;
/// push notifications append it to the notification text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment author line.
    #[serde(default)]
    pub author_name: String,
    /// Attachment body text.
    #[serde(default)]
    pub text: String,
    /// Plain-text fallback shown where the attachment cannot render.
    #[serde(default)]
    pub fallback: String,
}
