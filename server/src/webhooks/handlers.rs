//! Webhook Callback Handler
//!
//! The endpoint the platform posts events to.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use tracing::{debug, info, instrument, warn};

use super::dispatch;
use crate::api::AppState;
use crate::bot::BotContext;

/// Header carrying the base64 HMAC of the body.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// POST `{callback_path}`
///
/// Answers `200 OK` once the batch has been dispatched. Rejected callbacks are
/// also answered `200 OK` unless `reject_invalid_callbacks` is set.
#[instrument(skip_all, fields(body_len = body.len()))]
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, String)> {
    debug!("Callback received");

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let request = match state.parser.parse(signature, &body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Callback rejected");
            if state.config.reject_invalid_callbacks {
                return Err(e.into());
            }
            return Ok(StatusCode::OK);
        }
    };

    let ctx = BotContext::new(state.api.clone())
        .with_destination(request.destination.clone())
        .with_headers(headers);

    let report = dispatch::dispatch_events(state.handler.as_ref(), &ctx, &request.events).await;

    info!(
        handled = report.handled,
        replied = report.replied,
        failed = report.failed,
        "Callback processed"
    );

    Ok(StatusCode::OK)
}
