//! LINE Messaging API
//!
//! Outbound REST calls made on behalf of a bot: replies, profiles and
//! message content downloads.

pub mod client;
pub mod types;

pub use client::{LineMessagingClient, MessagingApi};
pub use types::{ApiError, Content, Message, ReplyMessage, UserProfile};
