//! Webhook Event Dispatch
//!
//! Routes each event of a callback to its handler by type tag and sends the
//! handler's reply. One failing event never stops the rest of the batch.

use tracing::{debug, error};

use super::events::{Event, EventKind, MessageContent};
use crate::bot::{BotContext, BotHandler, HandlerResult};

/// Counts for one dispatched batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Events passed to a handler.
    pub handled: usize,
    /// Replies accepted by the messaging API.
    pub replied: usize,
    /// Events whose handler or reply failed.
    pub failed: usize,
}

/// Dispatch events in order, sending any replies through `ctx`'s API.
pub async fn dispatch_events(
    handler: &dyn BotHandler,
    ctx: &BotContext,
    events: &[Event],
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for (i, event) in events.iter().enumerate() {
        debug!(
            index = i,
            event_type = event.event_type(),
            webhook_event_id = event.webhook_event_id.as_deref().unwrap_or_default(),
            redelivery = event.is_redelivery(),
            "event[{i}]={event:?}"
        );

        let outcome = route(handler, ctx, event).await;
        report.handled += 1;

        match outcome {
            Ok(Some(reply)) => {
                debug!(index = i, reply = ?reply, "Sending reply");
                match ctx.api().reply_message(&reply).await {
                    Ok(()) => report.replied += 1,
                    Err(e) => {
                        error!(
                            index = i,
                            event_type = event.event_type(),
                            status = e.status(),
                            "Failed to send reply: {}", e
                        );
                        report.failed += 1;
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!(
                    index = i,
                    event_type = event.event_type(),
                    "Event handler failed: {:#}", e
                );
                report.failed += 1;
            }
        }
    }

    report
}

async fn route(handler: &dyn BotHandler, ctx: &BotContext, event: &Event) -> HandlerResult {
    match &event.kind {
        EventKind::Message(message_event) => {
            route_message(handler, ctx, event, &message_event.message).await
        }
        EventKind::Unfollow => {
            handler.handle_unfollow(ctx, event).await?;
            Ok(None)
        }
        EventKind::Follow(_) => handler.handle_follow(ctx, event).await,
        EventKind::Join(_) => handler.handle_join(ctx, event).await,
        EventKind::Leave => {
            handler.handle_leave(ctx, event).await?;
            Ok(None)
        }
        EventKind::Postback(postback_event) => {
            handler
                .handle_postback(ctx, event, &postback_event.postback)
                .await
        }
        EventKind::Beacon(beacon_event) => {
            handler.handle_beacon(ctx, event, &beacon_event.beacon).await
        }
        EventKind::Unknown(_) => handler.handle_default_event(ctx, event).await,
    }
}

async fn route_message(
    handler: &dyn BotHandler,
    ctx: &BotContext,
    event: &Event,
    content: &MessageContent,
) -> HandlerResult {
    debug!(message = ?content, "message content");

    match content {
        MessageContent::Text(m) => handler.handle_text_message(ctx, event, m).await,
        MessageContent::Image(m) => handler.handle_image_message(ctx, event, m).await,
        MessageContent::Location(m) => handler.handle_location_message(ctx, event, m).await,
        MessageContent::Audio(m) => handler.handle_audio_message(ctx, event, m).await,
        MessageContent::Video(m) => handler.handle_video_message(ctx, event, m).await,
        MessageContent::Sticker(m) => handler.handle_sticker_message(ctx, event, m).await,
        MessageContent::File(m) => handler.handle_file_message(ctx, event, m).await,
        MessageContent::Unknown => handler.handle_default_event(ctx, event).await,
    }
}
