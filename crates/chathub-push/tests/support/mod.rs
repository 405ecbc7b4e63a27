//! Shared scaffolding for hub integration tests: an in-memory store
//! bundle and an HTTP push relay double that records every request and
//! verifies per-device serialization.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Duration as ChronoDuration;
use dashmap::DashMap;

use chathub_core::config::dynamic::DynamicPushConfig;
use chathub_core::config::push::PushConfig;
use chathub_core::types::id::{ChannelId, SessionId, UserId};
use chathub_core::AppResult;
use chathub_entity::{
    PushNotification, PushNotificationAck, PushResponse, Session, User,
};
use chathub_push::store::{PreferenceStore, SessionStore, Stores, ThreadStore, UserStore};

/// How the relay double answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayBehavior {
    /// Every request is answered `OK`.
    AlwaysOk,
    /// Odd requests are answered `REMOVE`, even requests `OK`.
    Alternate,
}

/// Recorded relay state.
pub struct RelayState {
    behavior: RelayBehavior,
    num_reqs: AtomicUsize,
    notifications: Mutex<Vec<PushNotification>>,
    acks: Mutex<Vec<PushNotificationAck>>,
    in_flight: DashMap<String, ()>,
    overlap_detected: AtomicBool,
}

/// An HTTP push relay double bound to an ephemeral local port.
pub struct TestRelay {
    pub url: String,
    state: Arc<RelayState>,
}

impl TestRelay {
    /// Start the relay double.
    pub async fn start(behavior: RelayBehavior) -> Self {
        let state = Arc::new(RelayState {
            behavior,
            num_reqs: AtomicUsize::new(0),
            notifications: Mutex::new(Vec::new()),
            acks: Mutex::new(Vec::new()),
            in_flight: DashMap::new(),
            overlap_detected: AtomicBool::new(false),
        });

        let router = Router::new()
            .route("/api/v1/send_push", post(handle_send_push))
            .route("/api/v1/ack", post(handle_ack))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind relay listener");
        let url = format!("http://{}", listener.local_addr().expect("relay addr"));

        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self { url, state }
    }

    pub fn num_reqs(&self) -> usize {
        self.state.num_reqs.load(Ordering::SeqCst)
    }

    pub fn notifications(&self) -> Vec<PushNotification> {
        self.state.notifications.lock().expect("lock").clone()
    }

    pub fn acks(&self) -> Vec<PushNotificationAck> {
        self.state.acks.lock().expect("lock").clone()
    }

    /// Fails the test if the relay ever saw two concurrent requests for
    /// one device id.
    pub fn assert_no_per_device_overlap(&self) {
        assert!(
            !self.state.overlap_detected.load(Ordering::SeqCst),
            "two requests for the same device id were in flight at once"
        );
    }

    /// Wait until the relay has seen `count` requests.
    pub async fn wait_for_requests(&self, count: usize) {
        for _ in 0..200 {
            if self.num_reqs() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!(
            "relay saw only {} of the {} expected requests",
            self.num_reqs(),
            count
        );
    }
}

async fn handle_send_push(
    State(state): State<Arc<RelayState>>,
    Json(notification): Json<PushNotification>,
) -> Json<PushResponse> {
    // Verify that messages arrive in order per device: a device id that
    // is already in flight means two hub workers raced on it.
    if let Some(device_id) = notification.device_id.clone() {
        if state.in_flight.insert(device_id.clone(), ()).is_some() {
            state.overlap_detected.store(true, Ordering::SeqCst);
        }
        // Hold the request open long enough that racing requests would
        // actually overlap.
        tokio::time::sleep(Duration::from_millis(30)).await;
        state.in_flight.remove(&device_id);
    }

    let seq = state.num_reqs.fetch_add(1, Ordering::SeqCst) + 1;
    state
        .notifications
        .lock()
        .expect("lock")
        .push(notification);

    Json(respond(state.behavior, seq))
}

async fn handle_ack(
    State(state): State<Arc<RelayState>>,
    Json(ack): Json<PushNotificationAck>,
) -> Json<PushResponse> {
    let seq = state.num_reqs.fetch_add(1, Ordering::SeqCst) + 1;
    state.acks.lock().expect("lock").push(ack);
    Json(respond(state.behavior, seq))
}

fn respond(behavior: RelayBehavior, seq: usize) -> PushResponse {
    match behavior {
        RelayBehavior::AlwaysOk => PushResponse::ok(),
        RelayBehavior::Alternate => {
            if seq % 2 == 1 {
                PushResponse::remove()
            } else {
                PushResponse::ok()
            }
        }
    }
}

/// In-memory implementation of the four store interfaces.
#[derive(Default)]
pub struct MemoryStores {
    pub unread: Mutex<i64>,
    pub thread_mentions: Mutex<i64>,
    pub crt_preference: Mutex<Option<bool>>,
    pub sessions: Mutex<Vec<Session>>,
    pub profiles: Mutex<HashMap<ChannelId, HashMap<UserId, User>>>,
}

impl MemoryStores {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_unread(&self, count: i64) {
        *self.unread.lock().expect("lock") = count;
    }

    pub fn set_thread_mentions(&self, count: i64) {
        *self.thread_mentions.lock().expect("lock") = count;
    }

    pub fn set_crt_preference(&self, enabled: Option<bool>) {
        *self.crt_preference.lock().expect("lock") = enabled;
    }

    /// Register a mobile session for the user and return it.
    pub fn add_session(&self, user_id: UserId, device_id: &str) -> Session {
        let session = Session::new(
            user_id,
            Some(device_id.to_string()),
            ChronoDuration::hours(1),
        );
        self.sessions.lock().expect("lock").push(session.clone());
        session
    }

    /// The current device binding of a session.
    pub fn device_binding(&self, session_id: SessionId) -> Option<String> {
        self.sessions
            .lock()
            .expect("lock")
            .iter()
            .find(|s| s.id == session_id)
            .and_then(|s| s.device_id.clone())
    }
}

#[async_trait]
impl UserStore for MemoryStores {
    async fn unread_conversation_count(
        &self,
        _user_id: UserId,
        _crt_enabled: bool,
    ) -> AppResult<i64> {
        Ok(*self.unread.lock().expect("lock"))
    }

    async fn profiles_in_channel(
        &self,
        channel_id: ChannelId,
    ) -> AppResult<HashMap<UserId, User>> {
        Ok(self
            .profiles
            .lock()
            .expect("lock")
            .get(&channel_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl SessionStore for MemoryStores {
    async fn sessions_with_active_devices(&self, user_id: UserId) -> AppResult<Vec<Session>> {
        Ok(self
            .sessions
            .lock()
            .expect("lock")
            .iter()
            .filter(|s| s.user_id == user_id && s.active_device_id().is_some())
            .cloned()
            .collect())
    }

    async fn clear_device_binding(&self, session_id: SessionId) -> AppResult<()> {
        let mut sessions = self.sessions.lock().expect("lock");
        if let Some(session) = sessions.iter_mut().find(|s| s.id == session_id) {
            session.device_id = None;
        }
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for MemoryStores {
    async fn collapsed_threads_enabled(&self, _user_id: UserId) -> AppResult<Option<bool>> {
        Ok(*self.crt_preference.lock().expect("lock"))
    }
}

#[async_trait]
impl ThreadStore for MemoryStores {
    async fn total_unread_mentions(&self, _user_id: UserId) -> AppResult<i64> {
        Ok(*self.thread_mentions.lock().expect("lock"))
    }
}

/// Bundle one memory store behind all four store interfaces.
pub fn stores(memory: &Arc<MemoryStores>) -> Stores {
    Stores {
        users: Arc::clone(memory) as Arc<dyn UserStore>,
        sessions: Arc::clone(memory) as Arc<dyn SessionStore>,
        preferences: Arc::clone(memory) as Arc<dyn PreferenceStore>,
        threads: Arc::clone(memory) as Arc<dyn ThreadStore>,
    }
}

/// A dynamic push configuration pointed at the relay double.
pub fn test_config(relay_url: &str) -> DynamicPushConfig {
    let config = PushConfig {
        relay_url: relay_url.to_string(),
        worker_count: 4,
        queue_capacity: 64,
        request_timeout_seconds: 5,
        drain_timeout_seconds: 5,
        ..PushConfig::default()
    };
    DynamicPushConfig::new(config)
}

/// Initialize test logging once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
