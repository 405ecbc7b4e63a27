//! Push notification dispatch configuration.

use serde::{Deserialize, Serialize};

/// How much of a message's content is revealed in a push notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushContents {
    /// Sender and full message text.
    Full,
    /// Sender and a generic phrase, channel identity included.
    Generic,
    /// Generic phrase with the channel identity withheld as well.
    GenericNoChannel,
}

impl PushContents {
    /// Parses from a string with a default fallback.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "generic" => Self::Generic,
            "generic_no_channel" => Self::GenericNoChannel,
            _ => Self::Full,
        }
    }

    /// Converts to string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Full => "full",
            Self::Generic => "generic",
            Self::GenericNoChannel => "generic_no_channel",
        }
    }
}

/// Server-wide collapsed reply threads mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapsedThreads {
    /// Collapsed threads are unavailable.
    Disabled,
    /// Available, off unless the user opts in.
    DefaultOff,
    /// Available, on unless the user opts out.
    DefaultOn,
    /// Forced on for every user.
    AlwaysOn,
}

/// How teammate names are rendered in notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameFormat {
    /// Show the login username.
    Username,
    /// Show "first last".
    FullName,
    /// Show the nickname, falling back to the full name.
    NicknameFullName,
}

/// Push notification dispatch settings.
///
/// These values are hot-reloadable through
/// [`DynamicPushConfig`](super::dynamic::DynamicPushConfig): the hub and the
/// relay client read a fresh snapshot for every operation they process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Base URL of the external push relay. Empty disables push delivery.
    #[serde(default)]
    pub relay_url: String,
    /// Content visibility policy for notification bodies.
    #[serde(default = "default_contents")]
    pub contents: PushContents,
    /// Number of hub workers (one bounded queue each).
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Capacity of each worker's inbound queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Timeout for a single relay HTTP request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Maximum time to wait for queues to drain on shutdown, in seconds.
    #[serde(default = "default_drain_timeout")]
    pub drain_timeout_seconds: u64,
    /// Server-wide collapsed reply threads mode.
    #[serde(default = "default_collapsed_threads")]
    pub collapsed_threads: CollapsedThreads,
    /// Whether users automatically follow threads they are mentioned in.
    #[serde(default = "default_true")]
    pub thread_auto_follow: bool,
    /// Name format used when rewriting mentions in notification text.
    #[serde(default = "default_name_format")]
    pub teammate_name_display: NameFormat,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            relay_url: String::new(),
            contents: default_contents(),
            worker_count: default_worker_count(),
            queue_capacity: default_queue_capacity(),
            request_timeout_seconds: default_request_timeout(),
            drain_timeout_seconds: default_drain_timeout(),
            collapsed_threads: default_collapsed_threads(),
            thread_auto_follow: true,
            teammate_name_display: default_name_format(),
        }
    }
}

fn default_contents() -> PushContents {
    PushContents::Full
}

fn default_worker_count() -> usize {
    4
}

fn default_queue_capacity() -> usize {
    256
}

fn default_request_timeout() -> u64 {
    10
}

fn default_drain_timeout() -> u64 {
    15
}

fn default_collapsed_threads() -> CollapsedThreads {
    CollapsedThreads::Disabled
}

fn default_true() -> bool {
    true
}

fn default_name_format() -> NameFormat {
    NameFormat::Username
}
