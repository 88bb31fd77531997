//! Bot Handler Trait
//!
//! One overridable method per event and message type. Every provided method
//! falls back to [`BotHandler::handle_default_event`], so a bot only writes
//! the handlers it cares about.

use async_trait::async_trait;
use tracing::debug;

use super::context::BotContext;
use crate::messaging::ReplyMessage;
use crate::webhooks::events::{
    AudioMessage, Beacon, Event, FileMessage, ImageMessage, LocationMessage, Postback,
    StickerMessage, TextMessage, VideoMessage,
};

/// Result of a handler that may answer the event. `None` sends nothing.
pub type HandlerResult = anyhow::Result<Option<ReplyMessage>>;

/// Per-type callbacks for webhook events.
///
/// Handlers return the reply to send, if any. Standby events carry no reply
/// token, so `event.reply_token()` is `None` for them.
#[async_trait]
pub trait BotHandler: Send + Sync {
    /// Fallback for every event whose specific handler is not overridden,
    /// and for event or message types this crate does not model. Unmodelled
    /// events arrive as [`EventKind::Unknown`](crate::webhooks::events::EventKind::Unknown)
    /// with their wire tag and raw JSON.
    async fn handle_default_event(&self, ctx: &BotContext, event: &Event) -> HandlerResult;

    /// A user sent a text message.
    async fn handle_text_message(
        &self,
        ctx: &BotContext,
        event: &Event,
        message: &TextMessage,
    ) -> HandlerResult {
        debug!(message_id = %message.id, "Handling text message");
        self.handle_default_event(ctx, event).await
    }

    /// A user sent an image; fetch it with [`BotContext::get_message_content`].
    async fn handle_image_message(
        &self,
        ctx: &BotContext,
        event: &Event,
        message: &ImageMessage,
    ) -> HandlerResult {
        debug!(message_id = %message.id, "Handling image message");
        self.handle_default_event(ctx, event).await
    }

    /// A user shared a location.
    async fn handle_location_message(
        &self,
        ctx: &BotContext,
        event: &Event,
        message: &LocationMessage,
    ) -> HandlerResult {
        debug!(message_id = %message.id, "Handling location message");
        self.handle_default_event(ctx, event).await
    }

    /// A user sent a sticker.
    async fn handle_sticker_message(
        &self,
        ctx: &BotContext,
        event: &Event,
        message: &StickerMessage,
    ) -> HandlerResult {
        debug!(
            message_id = %message.id,
            package_id = %message.package_id,
            sticker_id = %message.sticker_id,
            "Handling sticker message"
        );
        self.handle_default_event(ctx, event).await
    }

    /// A user sent a voice or audio clip.
    async fn handle_audio_message(
        &self,
        ctx: &BotContext,
        event: &Event,
        message: &AudioMessage,
    ) -> HandlerResult {
        debug!(message_id = %message.id, "Handling audio message");
        self.handle_default_event(ctx, event).await
    }

    /// A user sent a video.
    async fn handle_video_message(
        &self,
        ctx: &BotContext,
        event: &Event,
        message: &VideoMessage,
    ) -> HandlerResult {
        debug!(message_id = %message.id, "Handling video message");
        self.handle_default_event(ctx, event).await
    }

    /// A user sent a file.
    async fn handle_file_message(
        &self,
        ctx: &BotContext,
        event: &Event,
        message: &FileMessage,
    ) -> HandlerResult {
        debug!(message_id = %message.id, file_name = %message.file_name, "Handling file message");
        self.handle_default_event(ctx, event).await
    }

    /// The bot was added as a friend or unblocked.
    async fn handle_follow(&self, ctx: &BotContext, event: &Event) -> HandlerResult {
        debug!("Handling follow event");
        self.handle_default_event(ctx, event).await
    }

    /// The user blocked the bot; there is no reply token.
    async fn handle_unfollow(&self, ctx: &BotContext, event: &Event) -> anyhow::Result<()> {
        debug!("Handling unfollow event");
        discard_reply(self.handle_default_event(ctx, event).await?, event);
        Ok(())
    }

    /// The bot joined a group or room.
    async fn handle_join(&self, ctx: &BotContext, event: &Event) -> HandlerResult {
        debug!("Handling join event");
        self.handle_default_event(ctx, event).await
    }

    /// The bot left a group or room; there is no reply token.
    async fn handle_leave(&self, ctx: &BotContext, event: &Event) -> anyhow::Result<()> {
        debug!("Handling leave event");
        discard_reply(self.handle_default_event(ctx, event).await?, event);
        Ok(())
    }

    /// A user tapped an action that carries postback data.
    async fn handle_postback(
        &self,
        ctx: &BotContext,
        event: &Event,
        postback: &Postback,
    ) -> HandlerResult {
        debug!(data = %postback.data, "Handling postback event");
        self.handle_default_event(ctx, event).await
    }

    /// A user's device detected one of the channel's beacons.
    async fn handle_beacon(
        &self,
        ctx: &BotContext,
        event: &Event,
        beacon: &Beacon,
    ) -> HandlerResult {
        debug!(hwid = %beacon.hwid, kind = %beacon.kind, "Handling beacon event");
        self.handle_default_event(ctx, event).await
    }
}

fn discard_reply(reply: Option<ReplyMessage>, event: &Event) {
    if reply.is_some() {
        debug!(
            event_type = event.event_type(),
            "Discarding reply for an event that cannot be replied to"
        );
    }
}
