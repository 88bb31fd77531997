//! Messaging API Types
//!
//! Outbound reply bodies, profile responses and API errors.

use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMessage {
    pub reply_token: String,
    /// Up to five messages, sent in order.
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub notification_disabled: bool,
}

impl ReplyMessage {
    pub fn new(reply_token: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            reply_token: reply_token.into(),
            messages,
            notification_disabled: false,
        }
    }

    /// Single text reply.
    pub fn text(reply_token: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(reply_token, vec![Message::text(text)])
    }

    /// Deliver without a push notification.
    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.notification_disabled = true;
        self
    }
}

/// An outbound message object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Message {
    Text {
        text: String,
    },
    Sticker {
        package_id: String,
        sticker_id: String,
    },
    Image {
        original_content_url: String,
        preview_image_url: String,
    },
    Video {
        original_content_url: String,
        preview_image_url: String,
    },
    Audio {
        original_content_url: String,
        /// Length in milliseconds.
        duration: u64,
    },
    Location {
        title: String,
        address: String,
        latitude: f64,
        longitude: f64,
    },
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn sticker(package_id: impl Into<String>, sticker_id: impl Into<String>) -> Self {
        Self::Sticker {
            package_id: package_id.into(),
            sticker_id: sticker_id.into(),
        }
    }
}

/// Response of `GET /v2/bot/profile/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub display_name: String,
    pub user_id: String,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Error body returned by the platform on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

/// Messaging API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned {status}: {message}")]
    Status {
        status: u16,
        message: String,
        /// `X-Line-Request-Id` of the failed call, for support requests.
        request_id: Option<String>,
    },
    #[error("Invalid API base URL {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status, if the platform answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(_) | Self::InvalidUrl(_) => None,
        }
    }
}

enum ContentBody {
    Remote(reqwest::Response),
    Buffered(Bytes),
}

/// Binary content of an image, video, audio or file message.
pub struct Content {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    body: ContentBody,
}

impl Content {
    pub(crate) fn from_response(response: reqwest::Response) -> Self {
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Self {
            content_type,
            content_length: response.content_length(),
            body: ContentBody::Remote(response),
        }
    }

    /// Content already held in memory.
    pub fn from_bytes(content_type: Option<String>, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            content_type,
            content_length: Some(bytes.len() as u64),
            body: ContentBody::Buffered(bytes),
        }
    }

    /// Read the whole body.
    pub async fn bytes(self) -> Result<Bytes, ApiError> {
        match self.body {
            ContentBody::Remote(response) => Ok(response.bytes().await?),
            ContentBody::Buffered(bytes) => Ok(bytes),
        }
    }

    /// Stream the body chunk by chunk.
    pub fn into_stream(self) -> BoxStream<'static, Result<Bytes, ApiError>> {
        match self.body {
            ContentBody::Remote(response) => response.bytes_stream().map_err(ApiError::from).boxed(),
            ContentBody::Buffered(bytes) => stream::once(async move { Ok(bytes) }).boxed(),
        }
    }
}

impl std::fmt::Debug for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Content")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
