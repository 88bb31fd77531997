//! Messaging API Client
//!
//! The three platform calls the bot base needs: reply, profile and content.

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, instrument, warn};

use super::types::{ApiError, Content, ErrorBody, ReplyMessage, UserProfile};
use crate::config::Config;

/// Header carrying the platform's per-call request ID.
const REQUEST_ID_HEADER: &str = "x-line-request-id";

/// Outbound side of the platform API, as seen by handlers and the dispatcher.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Send a reply using the token from the triggering event.
    async fn reply_message(&self, reply: &ReplyMessage) -> Result<(), ApiError>;

    /// Fetch a user's display profile.
    async fn get_profile(&self, user_id: &str) -> Result<UserProfile, ApiError>;

    /// Fetch the binary content of a media or file message.
    async fn get_message_content(&self, message_id: &str) -> Result<Content, ApiError>;
}

/// `reqwest`-backed [`MessagingApi`] for one channel.
#[derive(Clone)]
pub struct LineMessagingClient {
    http: reqwest::Client,
    api_base_url: Url,
    data_api_base_url: Url,
    access_token: String,
}

impl LineMessagingClient {
    /// Build a client from server configuration.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.api_timeout())
            .user_agent(concat!("lb-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_http_client(
            http,
            &config.api_base_url,
            &config.data_api_base_url,
            &config.channel_access_token,
        )
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http_client(
        http: reqwest::Client,
        api_base_url: &str,
        data_api_base_url: &str,
        access_token: &str,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            http,
            api_base_url: parse_base_url(api_base_url)?,
            data_api_base_url: parse_base_url(data_api_base_url)?,
            access_token: access_token.to_string(),
        })
    }

    /// Pass successful responses through; turn anything else into [`ApiError::Status`].
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        debug!(
            status = status.as_u16(),
            request_id = request_id.as_deref().unwrap_or_default(),
            url = %response.url(),
            "Messaging API response"
        );

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                if text.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    text
                }
            });

        warn!(
            status = status.as_u16(),
            request_id = request_id.as_deref().unwrap_or_default(),
            error = %message,
            "Messaging API call failed"
        );

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
            request_id,
        })
    }
}

#[async_trait]
impl MessagingApi for LineMessagingClient {
    #[instrument(skip(self, reply), fields(messages = reply.messages.len()))]
    async fn reply_message(&self, reply: &ReplyMessage) -> Result<(), ApiError> {
        let response = self
            .http
            .post(endpoint(&self.api_base_url, &["v2", "bot", "message", "reply"]))
            .bearer_auth(&self.access_token)
            .json(reply)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .http
            .get(endpoint(&self.api_base_url, &["v2", "bot", "profile", user_id]))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    #[instrument(skip(self))]
    async fn get_message_content(&self, message_id: &str) -> Result<Content, ApiError> {
        let response = self
            .http
            .get(endpoint(
                &self.data_api_base_url,
                &["v2", "bot", "message", message_id, "content"],
            ))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Ok(Content::from_response(Self::check(response).await?))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!("{raw}: not a base URL")));
    }
    Ok(url)
}

/// Append `segments` to `base`, percent-encoding each one so IDs cannot
/// escape their path segment.
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Always Ok: bases are checked by `parse_base_url`
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

impl std::fmt::Debug for LineMessagingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineMessagingClient")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("data_api_base_url", &self.data_api_base_url.as_str())
            .finish_non_exhaustive()
    }
}
