//! The push notification hub.
//!
//! A fixed pool of workers, each draining its own bounded queue. Every
//! unit of work is routed to exactly one worker by a stable hash of the
//! device identifier (or the user identifier for device-less operations),
//! so all operations for one device execute in enqueue order while
//! distinct devices proceed fully in parallel. The session device-binding
//! mutation on a relay `REMOVE` verdict therefore has a single writer.

mod worker;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;

use chathub_core::config::dynamic::DynamicPushConfig;
use chathub_core::types::id::{AckId, ChannelId, PostId, SessionId, UserId};
use chathub_core::AppResult;
use chathub_entity::{
    Channel, ChannelNotifyProps, Post, PushNotificationAck, ReplyThreadType, Status, User,
};

use crate::badge::BadgeAggregator;
use crate::compose::catalog::MessageCatalog;
use crate::eligibility::{notify_props_allow_push, status_allows_push};
use crate::proxy::PushProxyClient;
use crate::store::Stores;

/// Everything the hub needs to know about one post notification.
#[derive(Debug, Clone)]
pub struct PostNotification {
    /// The post that triggered the notification.
    pub post: Post,
    /// The channel the post was made in.
    pub channel: Channel,
    /// The user to notify.
    pub receiver: User,
    /// Display name of the post author, as the receiver should see it.
    pub sender_name: String,
    /// The receiver was explicitly mentioned.
    pub explicit_mention: bool,
    /// The post used a channel-wide mention.
    pub channel_wide_mention: bool,
    /// How the post relates to a thread the receiver follows.
    pub reply_type: ReplyThreadType,
}

/// A unit of work routed to one hub worker.
pub(crate) enum PushTask {
    /// Compose and deliver a message notification to every device.
    Send(Box<PostNotification>),
    /// Dismiss delivered alerts for a conversation.
    Clear {
        user_id: UserId,
        channel_id: ChannelId,
        root_id: Option<PostId>,
        skip_session_id: Option<SessionId>,
    },
    /// Silent badge refresh on every device.
    UpdateBadge { user_id: UserId },
    /// Forward a client acknowledgement to the relay.
    Ack(Box<PushNotificationAck>),
    /// Diagnostic notification to one device; replies with the verdict.
    Test {
        device_id: String,
        reply: oneshot::Sender<bool>,
    },
    /// Shutdown marker; everything enqueued before it is processed first.
    Drain,
}

impl PushTask {
    fn kind(&self) -> &'static str {
        match self {
            Self::Send(_) => "send",
            Self::Clear { .. } => "clear",
            Self::UpdateBadge { .. } => "update_badge",
            Self::Ack(_) => "ack",
            Self::Test { .. } => "test",
            Self::Drain => "drain",
        }
    }
}

/// Routing key determining which worker owns a unit of work.
pub(crate) enum RouteKey<'a> {
    /// Operations addressed to a known device.
    Device(&'a str),
    /// Operations that fan out over a user's devices.
    User(UserId),
    /// Acknowledgements, which carry neither device nor user.
    Ack(AckId),
}

impl RouteKey<'_> {
    fn worker_index(&self, workers: usize) -> usize {
        let mut hasher = DefaultHasher::new();
        match self {
            Self::Device(device) => device.hash(&mut hasher),
            Self::User(user) => user.hash(&mut hasher),
            Self::Ack(ack) => ack.hash(&mut hasher),
        }
        (hasher.finish() % workers as u64) as usize
    }
}

/// Shared state handed to every worker.
pub(crate) struct HubContext {
    pub config: DynamicPushConfig,
    pub proxy: Arc<PushProxyClient>,
    pub stores: Stores,
    pub badges: BadgeAggregator,
    pub catalog: Arc<dyn MessageCatalog>,
}

/// The push notification dispatch hub.
///
/// Construct one per server with [`PushNotificationHub::new`] (requires a
/// running Tokio runtime) and stop it with
/// [`PushNotificationHub::shutdown`], which returns once every worker has
/// drained its queue or the configured drain timeout expires. Operations
/// submitted after shutdown are dropped silently.
pub struct PushNotificationHub {
    senders: Vec<mpsc::Sender<PushTask>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    stopped: AtomicBool,
    config: DynamicPushConfig,
}

impl PushNotificationHub {
    /// Start the hub: spawns the worker pool sized from the current
    /// configuration snapshot. Pool size and queue capacity are fixed for
    /// the hub's lifetime; the remaining settings are re-read per
    /// operation.
    pub fn new(
        config: DynamicPushConfig,
        proxy: Arc<PushProxyClient>,
        stores: Stores,
        catalog: Arc<dyn MessageCatalog>,
    ) -> Self {
        let snapshot = config.load();
        let worker_count = snapshot.worker_count.max(1);
        let queue_capacity = snapshot.queue_capacity.max(1);

        let context = Arc::new(HubContext {
            badges: BadgeAggregator::new(stores.clone()),
            config: config.clone(),
            proxy,
            stores,
            catalog,
        });

        let mut senders = Vec::with_capacity(worker_count);
        let mut handles = Vec::with_capacity(worker_count);
        for index in 0..worker_count {
            let (tx, rx) = mpsc::channel(queue_capacity);
            senders.push(tx);
            handles.push(tokio::spawn(worker::run(index, rx, Arc::clone(&context))));
        }

        tracing::info!(
            "Push hub started: workers={}, queue_capacity={}",
            worker_count,
            queue_capacity
        );

        Self {
            senders,
            handles: Mutex::new(handles),
            stopped: AtomicBool::new(false),
            config,
        }
    }

    /// Evaluate eligibility for a post notification and enqueue it.
    ///
    /// A suppressed notification is not an error: the typed reason is
    /// logged and the call returns `Ok`. A post carrying the
    /// force-notification prop bypasses both gates.
    pub async fn send_post_notification(
        &self,
        notification: PostNotification,
        channel_notify_props: &ChannelNotifyProps,
        status: &Status,
    ) -> AppResult<()> {
        let was_mentioned = notification.explicit_mention || notification.channel_wide_mention;

        if !notification.post.is_force_notification() {
            let is_gm = notification.channel.channel_type.is_group_message();
            if let Some(reason) = notify_props_allow_push(
                &notification.receiver,
                channel_notify_props,
                &notification.post,
                was_mentioned,
                is_gm,
            ) {
                tracing::debug!(
                    "Push suppressed for user {} on post {}: reason='{}'",
                    notification.receiver.id,
                    notification.post.id,
                    reason.as_str()
                );
                return Ok(());
            }

            let is_crt_reply = notification.reply_type == ReplyThreadType::CollapsedThread;
            if let Some(reason) = status_allows_push(
                &notification.receiver.notify_props,
                status,
                Some(notification.post.channel_id),
                is_crt_reply,
            ) {
                tracing::debug!(
                    "Push suppressed for user {} on post {}: reason='{}'",
                    notification.receiver.id,
                    notification.post.id,
                    reason.as_str()
                );
                return Ok(());
            }
        }

        let receiver = notification.receiver.id;
        self.enqueue(
            RouteKey::User(receiver),
            PushTask::Send(Box::new(notification)),
        )
        .await;
        Ok(())
    }

    /// Enqueue a `clear` notification for a conversation, fanned out to
    /// every active device of the user except the session that triggered
    /// the clear (there is nothing to dismiss on the device being read).
    pub async fn clear_push_notifications(
        &self,
        user_id: UserId,
        channel_id: ChannelId,
        root_id: Option<PostId>,
        skip_session_id: Option<SessionId>,
    ) {
        self.enqueue(
            RouteKey::User(user_id),
            PushTask::Clear {
                user_id,
                channel_id,
                root_id,
                skip_session_id,
            },
        )
        .await;
    }

    /// Enqueue a silent badge refresh for every active device of the user.
    pub async fn update_mobile_app_badge(&self, user_id: UserId) {
        self.enqueue(RouteKey::User(user_id), PushTask::UpdateBadge { user_id })
            .await;
    }

    /// Enqueue a client acknowledgement for forwarding to the relay.
    ///
    /// Forwarding failures are logged and never surfaced to the caller.
    pub async fn forward_ack(&self, ack: PushNotificationAck) {
        let key = ack.id;
        self.enqueue(RouteKey::Ack(key), PushTask::Ack(Box::new(ack)))
            .await;
    }

    /// Send a diagnostic `test` notification to one device and report the
    /// relay verdict as `"true"` / `"false"` for the diagnostics UI.
    pub async fn send_test_push_notification(&self, device_id: &str) -> String {
        let (reply, verdict) = oneshot::channel();
        self.enqueue(
            RouteKey::Device(device_id),
            PushTask::Test {
                device_id: device_id.to_string(),
                reply,
            },
        )
        .await;

        match verdict.await {
            Ok(true) => "true".to_string(),
            _ => "false".to_string(),
        }
    }

    /// Stop intake and wait for every worker to drain, up to the
    /// configured drain timeout per worker. Idempotent.
    pub async fn shutdown(&self) {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return;
        }

        tracing::info!("Push hub draining {} workers", self.senders.len());
        for sender in &self.senders {
            // A closed channel here just means the worker is already gone.
            let _ = sender.send(PushTask::Drain).await;
        }

        let drain_timeout = Duration::from_secs(self.config.load().drain_timeout_seconds.max(1));
        let handles: Vec<JoinHandle<()>> = self.handles.lock().await.drain(..).collect();
        for handle in handles {
            if tokio::time::timeout(drain_timeout, handle).await.is_err() {
                tracing::warn!(
                    "Push worker did not drain within {:?}; abandoning it",
                    drain_timeout
                );
            }
        }
        tracing::info!("Push hub stopped");
    }

    /// Route a task to its owning worker.
    ///
    /// The enqueue blocks while the target queue is full rather than
    /// dropping work; once the hub is stopped, tasks are dropped silently.
    async fn enqueue(&self, key: RouteKey<'_>, task: PushTask) {
        if self.stopped.load(Ordering::Acquire) {
            tracing::debug!("Push hub stopped; dropping '{}' operation", task.kind());
            return;
        }

        let index = key.worker_index(self.senders.len());
        let kind = task.kind();
        if self.senders[index].send(task).await.is_err() {
            tracing::debug!("Push hub stopped; dropping '{}' operation", kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_key_is_stable() {
        let user = UserId::new();
        let a = RouteKey::User(user).worker_index(8);
        let b = RouteKey::User(user).worker_index(8);
        assert_eq!(a, b);

        let c = RouteKey::Device("apple:token").worker_index(8);
        let d = RouteKey::Device("apple:token").worker_index(8);
        assert_eq!(c, d);
    }

    #[test]
    fn test_route_key_stays_in_range() {
        for workers in 1..=16 {
            for _ in 0..64 {
                assert!(RouteKey::User(UserId::new()).worker_index(workers) < workers);
            }
        }
    }
}
