//! LINE Bot Server
//!
//! Webhook base for LINE Messaging API bots: validates signed callbacks,
//! dispatches each event to an overridable handler and sends the replies.

pub mod api;
pub mod bot;
pub mod config;
pub mod messaging;
pub mod webhooks;
