//! App icon badge aggregation.

use chathub_core::config::push::{CollapsedThreads, PushConfig};
use chathub_core::types::id::UserId;
use chathub_core::AppResult;

use crate::store::Stores;

/// Computes the integer app-icon badge for a user.
///
/// The badge is advisory display state; the store remains the source of
/// truth for unread work.
#[derive(Clone)]
pub struct BadgeAggregator {
    stores: Stores,
}

impl BadgeAggregator {
    /// Create a new badge aggregator over the given stores.
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Whether collapsed reply threads are in effect for this user.
    ///
    /// The server mode gates the feature; within it the user preference
    /// decides, and a user who never touched the preference is treated as
    /// having it off.
    pub async fn crt_enabled_for_user(
        &self,
        user_id: UserId,
        config: &PushConfig,
    ) -> AppResult<bool> {
        if config.collapsed_threads == CollapsedThreads::Disabled {
            return Ok(false);
        }
        let preference = self
            .stores
            .preferences
            .collapsed_threads_enabled(user_id)
            .await?;
        Ok(preference.unwrap_or(false))
    }

    /// The badge value for the user: unread conversations, plus unread
    /// thread mentions when collapsed reply threads are in effect.
    pub async fn app_badge_count(&self, user_id: UserId, crt_enabled: bool) -> AppResult<i64> {
        let unread = self
            .stores
            .users
            .unread_conversation_count(user_id, crt_enabled)
            .await?;

        let badge = if crt_enabled {
            unread + self.stores.threads.total_unread_mentions(user_id).await?
        } else {
            unread
        };
        Ok(badge.max(0))
    }
}
