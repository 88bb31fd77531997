//! Echo Bot
//!
//! Reference bot served by the binary: repeats text and stickers back and
//! greets new friends and groups.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::context::BotContext;
use super::handler::{BotHandler, HandlerResult};
use crate::messaging::{Message, ReplyMessage};
use crate::webhooks::events::{Event, StickerMessage, TextMessage};

#[derive(Debug, Clone, Copy, Default)]
pub struct EchoBot;

#[async_trait]
impl BotHandler for EchoBot {
    async fn handle_default_event(&self, _ctx: &BotContext, event: &Event) -> HandlerResult {
        debug!(event_type = event.event_type(), "Ignoring event");
        Ok(None)
    }

    async fn handle_text_message(
        &self,
        _ctx: &BotContext,
        event: &Event,
        message: &TextMessage,
    ) -> HandlerResult {
        Ok(event
            .reply_token()
            .map(|token| ReplyMessage::text(token, message.text.clone())))
    }

    async fn handle_sticker_message(
        &self,
        _ctx: &BotContext,
        event: &Event,
        message: &StickerMessage,
    ) -> HandlerResult {
        Ok(event.reply_token().map(|token| {
            ReplyMessage::new(
                token,
                vec![Message::sticker(&message.package_id, &message.sticker_id)],
            )
        }))
    }

    async fn handle_follow(&self, ctx: &BotContext, event: &Event) -> HandlerResult {
        let Some(token) = event.reply_token() else {
            return Ok(None);
        };

        let user_id = event.source.as_ref().and_then(|s| s.user_id());
        let greeting = match user_id {
            Some(user_id) => match ctx.get_user_profile(user_id).await {
                Ok(profile) => format!("Hello, {}!", profile.display_name),
                Err(e) => {
                    warn!(user_id, error = %e, "Profile lookup failed, using plain greeting");
                    "Hello!".to_string()
                }
            },
            None => "Hello!".to_string(),
        };

        Ok(Some(ReplyMessage::text(token, greeting)))
    }

    async fn handle_join(&self, _ctx: &BotContext, event: &Event) -> HandlerResult {
        Ok(event
            .reply_token()
            .map(|token| ReplyMessage::text(token, "Thanks for inviting me!")))
    }
}
