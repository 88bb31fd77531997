//! Bot Handlers
//!
//! The extension point of the server: implement [`BotHandler`] and hand it
//! to [`crate::api::AppState`].

pub mod context;
pub mod echo;
pub mod handler;

pub use context::BotContext;
pub use echo::EchoBot;
pub use handler::{BotHandler, HandlerResult};
