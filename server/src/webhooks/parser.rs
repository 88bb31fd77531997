//! Callback Request Parser
//!
//! Checks the signature first, then decodes the body.

use tracing::{debug, enabled, trace, Level};

use super::events::CallbackRequest;
use super::signing::SignatureValidator;
use super::types::CallbackError;

/// Turns a raw signed callback into a [`CallbackRequest`].
#[derive(Debug, Clone)]
pub struct CallbackParser {
    validator: SignatureValidator,
}

impl CallbackParser {
    pub const fn new(validator: SignatureValidator) -> Self {
        Self { validator }
    }

    /// Validate `signature` against `body` and decode the event batch.
    pub fn parse(
        &self,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<CallbackRequest, CallbackError> {
        let signature = signature
            .filter(|s| !s.trim().is_empty())
            .ok_or(CallbackError::MissingSignature)?;

        if !self.validator.validate(body, signature) {
            return Err(CallbackError::InvalidSignature);
        }

        if enabled!(Level::TRACE) {
            match serde_json::from_slice::<serde_json::Value>(body)
                .and_then(|v| serde_json::to_string_pretty(&v))
            {
                Ok(pretty) => trace!("callback body\n{pretty}"),
                Err(_) => trace!(body = %String::from_utf8_lossy(body), "callback body"),
            }
        }

        let request: CallbackRequest = serde_json::from_slice(body)?;
        debug!(
            destination = request.destination.as_deref().unwrap_or_default(),
            events = request.events.len(),
            "Callback accepted"
        );
        Ok(request)
    }
}
