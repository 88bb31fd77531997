//! Webhook Callbacks
//!
//! Signed callback intake: signature check, event decoding and dispatch of
//! each event to the configured bot handler.

pub mod dispatch;
pub mod events;
pub mod handlers;
pub mod parser;
pub mod signing;
pub mod types;

pub use parser::CallbackParser;
pub use signing::SignatureValidator;
pub use types::CallbackError;
