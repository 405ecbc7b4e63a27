//! Hub worker loop and per-operation handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use chathub_core::config::push::{NameFormat, PushConfig, PushContents};
use chathub_core::types::id::{AckId, ChannelId, PostId, SessionId, UserId};
use chathub_core::AppResult;
use chathub_entity::{
    PushNotification, PushNotificationAck, PushResponse, PushStatus, PushType, Session,
};

use crate::compose::{append_attachment_fallbacks, compose_push_message, rewrite_mentions};

use super::{HubContext, PostNotification, PushTask};

/// Worker loop: drain the queue until the shutdown marker arrives.
///
/// Tasks are processed strictly one at a time, which is what guarantees
/// per-device delivery ordering.
pub(crate) async fn run(index: usize, mut tasks: mpsc::Receiver<PushTask>, ctx: Arc<HubContext>) {
    tracing::debug!("Push worker {} started", index);
    while let Some(task) = tasks.recv().await {
        match task {
            PushTask::Drain => break,
            task => process(&ctx, task).await,
        }
    }
    tracing::debug!("Push worker {} drained", index);
}

async fn process(ctx: &HubContext, task: PushTask) {
    match task {
        PushTask::Send(notification) => {
            if let Err(e) = handle_send(ctx, &notification).await {
                tracing::error!(
                    "Failed to dispatch push notification for post {}: {}",
                    notification.post.id,
                    e
                );
            }
        }
        PushTask::Clear {
            user_id,
            channel_id,
            root_id,
            skip_session_id,
        } => {
            if let Err(e) = handle_clear(ctx, user_id, channel_id, root_id, skip_session_id).await
            {
                tracing::error!(
                    "Failed to dispatch clear notification for channel {}: {}",
                    channel_id,
                    e
                );
            }
        }
        PushTask::UpdateBadge { user_id } => {
            if let Err(e) = handle_update_badge(ctx, user_id).await {
                tracing::error!("Failed to dispatch badge update for user {}: {}", user_id, e);
            }
        }
        PushTask::Ack(ack) => handle_ack(ctx, &ack).await,
        PushTask::Test { device_id, reply } => {
            let delivered = handle_test(ctx, &device_id).await;
            // The caller may have given up waiting; nothing to do then.
            let _ = reply.send(delivered);
        }
        PushTask::Drain => {}
    }
}

/// Compose and fan a message notification out to the receiver's devices.
async fn handle_send(ctx: &HubContext, request: &PostNotification) -> AppResult<()> {
    let config = ctx.config.load();

    let mut text = request.post.message.clone();
    if config.contents == PushContents::Full
        && config.teammate_name_display != NameFormat::Username
    {
        let members = ctx
            .stores
            .users
            .profiles_in_channel(request.post.channel_id)
            .await?;
        text = rewrite_mentions(&text, &members, config.teammate_name_display);
    }

    let body = compose_push_message(
        config.contents,
        &text,
        request.explicit_mention,
        request.channel_wide_mention,
        request.post.has_files(),
        &request.sender_name,
        request.channel.channel_type,
        request.reply_type,
        ctx.catalog.as_ref(),
    );

    let crt_enabled = ctx
        .badges
        .crt_enabled_for_user(request.receiver.id, &config)
        .await?;

    let mut notification = PushNotification::new(PushType::Message);
    notification.message = append_attachment_fallbacks(body, &request.post.props.attachments);
    notification.badge = ctx
        .badges
        .app_badge_count(request.receiver.id, crt_enabled)
        .await?;
    notification.channel_id = Some(request.post.channel_id);
    notification.channel_name = channel_name(&config, request);
    notification.post_id = Some(request.post.id);
    notification.root_id = request.post.root_id;
    notification.sender_id = Some(request.post.user_id);
    notification.sender_name = Some(request.sender_name.clone());
    notification.is_crt_enabled = crt_enabled;

    dispatch_to_sessions(ctx, notification, request.receiver.id, None).await
}

/// The channel identity shown on the notification, if the policy reveals it.
fn channel_name(config: &PushConfig, request: &PostNotification) -> Option<String> {
    match config.contents {
        PushContents::GenericNoChannel => None,
        _ => Some(request.channel.display_name.clone()),
    }
}

/// Dismiss delivered alerts for a conversation on every device except the
/// one the user is reading on.
async fn handle_clear(
    ctx: &HubContext,
    user_id: UserId,
    channel_id: ChannelId,
    root_id: Option<PostId>,
    skip_session_id: Option<SessionId>,
) -> AppResult<()> {
    let config = ctx.config.load();
    let crt_enabled = ctx.badges.crt_enabled_for_user(user_id, &config).await?;

    let mut notification = PushNotification::new(PushType::Clear);
    notification.channel_id = Some(channel_id);
    notification.root_id = root_id;
    notification.badge = ctx.badges.app_badge_count(user_id, crt_enabled).await?;
    notification.is_crt_enabled = crt_enabled;

    dispatch_to_sessions(ctx, notification, user_id, skip_session_id).await
}

/// Silent badge refresh on every active device of the user.
async fn handle_update_badge(ctx: &HubContext, user_id: UserId) -> AppResult<()> {
    let config = ctx.config.load();
    let crt_enabled = ctx.badges.crt_enabled_for_user(user_id, &config).await?;

    let mut notification = PushNotification::new(PushType::UpdateBadge);
    notification.badge = ctx.badges.app_badge_count(user_id, crt_enabled).await?;
    notification.content_available = 1;
    notification.sound = Some("none".to_string());
    notification.is_crt_enabled = crt_enabled;

    dispatch_to_sessions(ctx, notification, user_id, None).await
}

/// Forward a client acknowledgement; failures are logged, never retried.
async fn handle_ack(ctx: &HubContext, ack: &PushNotificationAck) {
    match ctx.proxy.ack(ack).await {
        Ok(PushResponse {
            status: PushStatus::Fail,
            error,
        }) => {
            tracing::warn!(
                "Push relay rejected ack {}: {}",
                ack.id,
                error.unwrap_or_default()
            );
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("Failed to forward push ack {}: {}", ack.id, e),
    }
}

/// Deliver a diagnostic notification to one specific device.
async fn handle_test(ctx: &HubContext, device_id: &str) -> bool {
    let mut notification = PushNotification::new(PushType::Test);
    notification.device_id = Some(device_id.to_string());
    notification.ack_id = Some(AckId::new());

    match ctx.proxy.send(&notification).await {
        Ok(PushResponse {
            status: PushStatus::Ok,
            ..
        }) => true,
        Ok(response) => {
            tracing::info!(
                "Test push to device '{}' was not delivered: status={:?}",
                device_id,
                response.status
            );
            false
        }
        Err(e) => {
            tracing::warn!("Test push to device '{}' failed: {}", device_id, e);
            false
        }
    }
}

/// Send one composed notification to every active-device session of the
/// user, processing the relay verdict per session.
async fn dispatch_to_sessions(
    ctx: &HubContext,
    notification: PushNotification,
    user_id: UserId,
    skip_session_id: Option<SessionId>,
) -> AppResult<()> {
    let sessions = ctx
        .stores
        .sessions
        .sessions_with_active_devices(user_id)
        .await?;

    for session in sessions {
        if skip_session_id == Some(session.id) {
            continue;
        }
        let Some(device_id) = session.active_device_id() else {
            continue;
        };

        let mut outbound = notification.clone();
        outbound.device_id = Some(device_id.to_string());
        outbound.ack_id = Some(AckId::new());

        match ctx.proxy.send(&outbound).await {
            Ok(response) => handle_relay_verdict(ctx, &session, &outbound, response).await,
            Err(e) => {
                // A push failure must never fail the chat action behind it.
                tracing::error!(
                    "Push dispatch to device '{}' failed: {}",
                    outbound.device_id.as_deref().unwrap_or_default(),
                    e
                );
            }
        }
    }
    Ok(())
}

/// Apply the relay's verdict for one delivered request.
async fn handle_relay_verdict(
    ctx: &HubContext,
    session: &Session,
    notification: &PushNotification,
    response: PushResponse,
) {
    match response.status {
        PushStatus::Ok => {}
        PushStatus::Remove => {
            tracing::info!(
                "Push relay retired device '{}'; clearing binding on session {}",
                notification.device_id.as_deref().unwrap_or_default(),
                session.id
            );
            if let Err(e) = ctx.stores.sessions.clear_device_binding(session.id).await {
                tracing::error!(
                    "Failed to clear device binding on session {}: {}",
                    session.id,
                    e
                );
            }
        }
        PushStatus::Fail => {
            tracing::error!(
                "Push relay rejected {} notification for device '{}': {}",
                notification.push_type.as_str(),
                notification.device_id.as_deref().unwrap_or_default(),
                response.error.as_deref().unwrap_or_default()
            );
        }
    }
}
