//! Narrow store interfaces the push core depends on.
//!
//! Persistence lives elsewhere; the engine only ever calls through these
//! traits. Implementations must serialize their own concurrent writers —
//! the single exception is the session device binding, which is only ever
//! mutated by the hub worker that owns the device.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use chathub_core::types::id::{ChannelId, SessionId, UserId};
use chathub_core::AppResult;
use chathub_entity::{Session, User};

/// User lookups needed for badges and mention rewriting.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Number of conversations with unread activity for the user.
    ///
    /// `crt_enabled` selects the counting mode: with collapsed reply
    /// threads, thread replies do not mark their parent channel unread.
    async fn unread_conversation_count(
        &self,
        user_id: UserId,
        crt_enabled: bool,
    ) -> AppResult<i64>;

    /// All members of a channel, keyed by user id.
    async fn profiles_in_channel(
        &self,
        channel_id: ChannelId,
    ) -> AppResult<HashMap<UserId, User>>;
}

/// Session lookups and the device-binding mutation.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Unexpired sessions of the user that carry a device binding.
    async fn sessions_with_active_devices(&self, user_id: UserId) -> AppResult<Vec<Session>>;

    /// Clear the device binding on a session; the session itself survives.
    async fn clear_device_binding(&self, session_id: SessionId) -> AppResult<()>;
}

/// Per-user preference lookups.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// The user's collapsed-reply-threads preference, `None` if never set.
    async fn collapsed_threads_enabled(&self, user_id: UserId) -> AppResult<Option<bool>>;
}

/// Reply-thread mention counters.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// Total unread thread mentions for the user across all channels.
    async fn total_unread_mentions(&self, user_id: UserId) -> AppResult<i64>;
}

/// Bundle of store handles wired into the push engine.
#[derive(Clone)]
pub struct Stores {
    /// User store.
    pub users: Arc<dyn UserStore>,
    /// Session store.
    pub sessions: Arc<dyn SessionStore>,
    /// Preference store.
    pub preferences: Arc<dyn PreferenceStore>,
    /// Thread store.
    pub threads: Arc<dyn ThreadStore>,
}
