//! HTTP client for the external push relay.

use std::time::Duration;

use serde::Serialize;

use chathub_core::config::dynamic::DynamicPushConfig;
use chathub_core::error::ErrorKind;
use chathub_core::{AppError, AppResult};
use chathub_entity::{PushNotification, PushNotificationAck, PushResponse};

/// Relay endpoint for outbound notifications.
const SEND_PUSH_PATH: &str = "api/v1/send_push";
/// Relay endpoint for forwarded client acknowledgements.
const ACK_PATH: &str = "api/v1/ack";

/// Synchronous JSON client for the push relay.
///
/// Both operations read the relay URL and request timeout from the
/// current configuration snapshot, so a hot-reloaded relay address is
/// picked up by the next request. Relay-side rejections (non-2xx status,
/// undecodable body) surface as a `FAIL` [`PushResponse`], not as an
/// error; only local validation and connection-level failures return
/// `Err`.
#[derive(Debug, Clone)]
pub struct PushProxyClient {
    http: reqwest::Client,
    config: DynamicPushConfig,
}

impl PushProxyClient {
    /// Create a client reading relay settings from `config`.
    pub fn new(config: DynamicPushConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to build push relay HTTP client: {e}"),
                e,
            )
        })?;
        Ok(Self { http, config })
    }

    /// Send a notification to the relay and return its verdict.
    ///
    /// A notification with no deliverable payload fails locally before
    /// any network call.
    pub async fn send(&self, notification: &PushNotification) -> AppResult<PushResponse> {
        if notification.is_empty_payload() {
            return Err(AppError::validation(
                "push notification carries no deliverable payload",
            ));
        }
        self.post(SEND_PUSH_PATH, notification).await
    }

    /// Forward a client acknowledgement to the relay.
    pub async fn ack(&self, ack: &PushNotificationAck) -> AppResult<PushResponse> {
        self.post(ACK_PATH, ack).await
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> AppResult<PushResponse> {
        let config = self.config.load();
        if config.relay_url.is_empty() {
            return Err(AppError::configuration("push relay URL is not configured"));
        }

        let url = format!("{}/{path}", config.relay_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Push relay request to {url} failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Ok(PushResponse::error(format!(
                "push relay returned HTTP {status}"
            )));
        }

        match response.json::<PushResponse>().await {
            Ok(verdict) => Ok(verdict),
            Err(e) => Ok(PushResponse::error(format!(
                "undecodable push relay response: {e}"
            ))),
        }
    }
}
