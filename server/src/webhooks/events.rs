//! Callback Event Types
//!
//! Inbound webhook payload: a batch of events, each tagged by `type`.
//! Only the fields handlers read are modelled; unknown fields are ignored.
//! Events are decoded one at a time, so an entry that does not fit the model
//! is kept as [`EventKind::Unknown`] or skipped without losing the rest of
//! the batch.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Body of a webhook callback.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackRequest {
    /// User ID of the bot that should receive the events.
    #[serde(default)]
    pub destination: Option<String>,
    /// Events in delivery order. `null` and undecodable entries are dropped.
    #[serde(default, deserialize_with = "decode_events")]
    pub events: Vec<Event>,
}

fn decode_events<'de, D>(deserializer: D) -> Result<Vec<Event>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<Option<Value>> = Deserialize::deserialize(deserializer)?;
    let events = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match Event::from_value(entry?) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(index, "Skipping undecodable event: {}", e);
                None
            }
        })
        .collect();
    Ok(events)
}

/// Tags with a typed [`EventKind`] variant.
const MODELLED_EVENT_TYPES: [&str; 7] = [
    "message", "follow", "unfollow", "join", "leave", "postback", "beacon",
];

/// A single webhook event: common envelope plus the type-specific body.
#[derive(Debug, Clone)]
pub struct Event {
    /// Event time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Where the event came from. Absent on some channel-level events.
    pub source: Option<Source>,
    /// Channel state: `active` or `standby`.
    pub mode: Option<String>,
    /// ULID identifying the event; stable across redeliveries.
    pub webhook_event_id: Option<String>,
    pub delivery_context: Option<DeliveryContext>,
    pub kind: EventKind,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    source: Option<Source>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    webhook_event_id: Option<String>,
    #[serde(default)]
    delivery_context: Option<DeliveryContext>,
}

impl Event {
    /// Decode one entry of the `events` array.
    ///
    /// Fails only when the entry has no string `type` or a malformed
    /// envelope. A type this crate does not model, or a modelled type whose
    /// body does not match, becomes [`EventKind::Unknown`] with the raw JSON.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let envelope = Envelope::deserialize(&value)?;
        let kind = EventKind::from_value(value)?;
        Ok(Self {
            timestamp: envelope.timestamp,
            source: envelope.source,
            mode: envelope.mode,
            webhook_event_id: envelope.webhook_event_id,
            delivery_context: envelope.delivery_context,
            kind,
        })
    }

    /// Reply token, for event types that can be replied to.
    ///
    /// `None` for standby events, which the platform sends without one.
    pub fn reply_token(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Message(e) => e.reply_token.as_deref(),
            EventKind::Follow(e) => e.reply_token.as_deref(),
            EventKind::Join(e) => e.reply_token.as_deref(),
            EventKind::Postback(e) => e.reply_token.as_deref(),
            EventKind::Beacon(e) => e.reply_token.as_deref(),
            EventKind::Unknown(e) => e.body.get("replyToken").and_then(Value::as_str),
            EventKind::Unfollow | EventKind::Leave => None,
        }
    }

    /// The wire `type` tag, including tags this crate does not model.
    pub fn event_type(&self) -> &str {
        self.kind.as_str()
    }

    /// Event time as a UTC timestamp.
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Whether the platform is redelivering an event it already sent once.
    pub fn is_redelivery(&self) -> bool {
        self.delivery_context
            .as_ref()
            .is_some_and(|ctx| ctx.is_redelivery)
    }

    /// Whether the channel is in standby mode (another module owns replies).
    pub fn is_standby(&self) -> bool {
        self.mode.as_deref() == Some("standby")
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryContext {
    #[serde(default)]
    pub is_redelivery: bool,
}

/// Type-specific part of an [`Event`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventKind {
    /// A user sent a message.
    Message(MessageEvent),
    /// The bot was added as a friend or unblocked.
    Follow(FollowEvent),
    /// The bot was blocked.
    Unfollow,
    /// The bot joined a group or room.
    Join(JoinEvent),
    /// The bot was removed from a group or left a room.
    Leave,
    /// A user triggered a postback action.
    Postback(PostbackEvent),
    /// A user entered the range of a LINE Beacon.
    Beacon(BeaconEvent),
    /// Any event this crate does not model, with its wire tag and raw body.
    #[serde(skip_deserializing)]
    Unknown(UnknownEvent),
}

impl EventKind {
    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let Some(tag) = value.get("type").and_then(Value::as_str) else {
            return Err(de::Error::missing_field("type"));
        };
        let event_type = tag.to_owned();

        match Self::deserialize(&value) {
            Ok(kind) => Ok(kind),
            Err(e) => {
                if MODELLED_EVENT_TYPES.contains(&event_type.as_str()) {
                    warn!(event_type = %event_type, "Event body does not match its type: {}", e);
                }
                Ok(Self::Unknown(UnknownEvent {
                    event_type,
                    body: value,
                }))
            }
        }
    }

    /// Convert to the wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Message(_) => "message",
            Self::Follow(_) => "follow",
            Self::Unfollow => "unfollow",
            Self::Join(_) => "join",
            Self::Leave => "leave",
            Self::Postback(_) => "postback",
            Self::Beacon(_) => "beacon",
            Self::Unknown(e) => &e.event_type,
        }
    }
}

/// An event kept as raw JSON, e.g. `memberJoined` or `unsend`.
#[derive(Debug, Clone)]
pub struct UnknownEvent {
    /// The `type` tag as sent.
    pub event_type: String,
    /// The whole event object, envelope included.
    pub body: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    #[serde(default)]
    pub reply_token: Option<String>,
    pub message: MessageContent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEvent {
    #[serde(default)]
    pub reply_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinEvent {
    #[serde(default)]
    pub reply_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostbackEvent {
    #[serde(default)]
    pub reply_token: Option<String>,
    pub postback: Postback,
}

/// Postback payload set by the action that triggered it.
#[derive(Debug, Clone, Deserialize)]
pub struct Postback {
    pub data: String,
    /// Date/time picker results (`date`, `time` or `datetime`).
    #[serde(default)]
    pub params: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeaconEvent {
    #[serde(default)]
    pub reply_token: Option<String>,
    pub beacon: Beacon,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Beacon {
    /// Hardware ID of the beacon.
    pub hwid: String,
    /// `enter`, `banner` or `stay`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Device message of the beacon, hex encoded.
    #[serde(default)]
    pub dm: Option<String>,
}

/// Origin of an event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    User {
        #[serde(rename = "userId")]
        user_id: String,
    },
    Group {
        #[serde(rename = "groupId")]
        group_id: String,
        #[serde(rename = "userId", default)]
        user_id: Option<String>,
    },
    Room {
        #[serde(rename = "roomId")]
        room_id: String,
        #[serde(rename = "userId", default)]
        user_id: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

impl Source {
    /// The user behind the event, when the platform discloses it.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            Self::Group { user_id, .. } | Self::Room { user_id, .. } => user_id.as_deref(),
            Self::Unknown => None,
        }
    }

    /// The conversation to address: group or room ID, otherwise the user ID.
    pub fn sender_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            Self::Group { group_id, .. } => Some(group_id),
            Self::Room { room_id, .. } => Some(room_id),
            Self::Unknown => None,
        }
    }
}

/// Message body of a [`MessageEvent`], tagged by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text(TextMessage),
    Image(ImageMessage),
    Video(VideoMessage),
    Audio(AudioMessage),
    File(FileMessage),
    Location(LocationMessage),
    Sticker(StickerMessage),
    #[serde(other)]
    Unknown,
}

impl MessageContent {
    /// Message ID, used to fetch binary content.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Text(m) => Some(&m.id),
            Self::Image(m) => Some(&m.id),
            Self::Video(m) => Some(&m.id),
            Self::Audio(m) => Some(&m.id),
            Self::File(m) => Some(&m.id),
            Self::Location(m) => Some(&m.id),
            Self::Sticker(m) => Some(&m.id),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub quote_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentProviderType {
    /// Binary content is stored on the platform and fetched by message ID.
    #[default]
    Line,
    /// Content lives at `original_content_url`.
    External,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentProvider {
    #[serde(rename = "type", default)]
    pub kind: ContentProviderType,
    #[serde(default)]
    pub original_content_url: Option<String>,
    #[serde(default)]
    pub preview_image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMessage {
    pub id: String,
    #[serde(default)]
    pub content_provider: ContentProvider,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMessage {
    pub id: String,
    /// Length in milliseconds.
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub content_provider: ContentProvider,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    pub id: String,
    /// Length in milliseconds.
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub content_provider: ContentProvider,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMessage {
    pub id: String,
    pub file_name: String,
    pub file_size: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMessage {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerMessage {
    pub id: String,
    pub package_id: String,
    pub sticker_id: String,
    #[serde(default)]
    pub sticker_resource_type: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> CallbackRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_text_message_event() {
        let req = parse(json!({
            "destination": "Ubot",
            "events": [{
                "type": "message",
                "mode": "active",
                "timestamp": 1462629479859_i64,
                "source": { "type": "user", "userId": "U4af4980629" },
                "webhookEventId": "01FZ74A0TDDPYRVKNK77XKC3ZR",
                "deliveryContext": { "isRedelivery": false },
                "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
                "message": { "id": "444573844083572737", "type": "text", "text": "Hello" }
            }]
        }));

        assert_eq!(req.destination.as_deref(), Some("Ubot"));
        assert_eq!(req.events.len(), 1);
        let event = &req.events[0];
        assert_eq!(event.event_type(), "message");
        assert_eq!(event.reply_token(), Some("nHuyWiB7yP5Zw52FIkcQobQuGDXCTA"));
        assert_eq!(
            event.webhook_event_id.as_deref(),
            Some("01FZ74A0TDDPYRVKNK77XKC3ZR")
        );
        assert!(!event.is_redelivery());
        assert!(!event.is_standby());
        assert_eq!(
            event.occurred_at().unwrap().to_rfc3339(),
            "2016-05-07T13:57:59.859+00:00"
        );
        assert_eq!(
            event.source.as_ref().and_then(Source::user_id),
            Some("U4af4980629")
        );

        match &event.kind {
            EventKind::Message(m) => match &m.message {
                MessageContent::Text(text) => {
                    assert_eq!(text.id, "444573844083572737");
                    assert_eq!(text.text, "Hello");
                }
                other => panic!("expected text, got {other:?}"),
            },
            other => panic!("expected message event, got {other:?}"),
        }
    }

    #[test]
    fn decodes_every_modelled_event_type() {
        let req = parse(json!({
            "events": [
                { "type": "follow", "timestamp": 1, "replyToken": "r1",
                  "source": { "type": "user", "userId": "U1" } },
                { "type": "unfollow", "timestamp": 2,
                  "source": { "type": "user", "userId": "U1" } },
                { "type": "join", "timestamp": 3, "replyToken": "r3",
                  "source": { "type": "group", "groupId": "C1" } },
                { "type": "leave", "timestamp": 4,
                  "source": { "type": "room", "roomId": "R1" } },
                { "type": "postback", "timestamp": 5, "replyToken": "r5",
                  "source": { "type": "user", "userId": "U1" },
                  "postback": { "data": "action=buy&item=1", "params": { "date": "2017-09-03" } } },
                { "type": "beacon", "timestamp": 6, "replyToken": "r6",
                  "source": { "type": "user", "userId": "U1" },
                  "beacon": { "hwid": "d41d8cd98f", "type": "enter", "dm": "1234" } }
            ]
        }));

        let tags: Vec<_> = req.events.iter().map(Event::event_type).collect();
        assert_eq!(
            tags,
            ["follow", "unfollow", "join", "leave", "postback", "beacon"]
        );
        let tokens: Vec<_> = req.events.iter().map(Event::reply_token).collect();
        assert_eq!(
            tokens,
            [Some("r1"), None, Some("r3"), None, Some("r5"), Some("r6")]
        );

        match &req.events[4].kind {
            EventKind::Postback(p) => {
                assert_eq!(p.postback.data, "action=buy&item=1");
                let params = p.postback.params.as_ref().unwrap();
                assert_eq!(params.get("date").map(String::as_str), Some("2017-09-03"));
            }
            other => panic!("expected postback, got {other:?}"),
        }
        match &req.events[5].kind {
            EventKind::Beacon(b) => {
                assert_eq!(b.beacon.hwid, "d41d8cd98f");
                assert_eq!(b.beacon.kind, "enter");
                assert_eq!(b.beacon.dm.as_deref(), Some("1234"));
            }
            other => panic!("expected beacon, got {other:?}"),
        }
    }

    #[test]
    fn decodes_media_and_location_messages() {
        let req = parse(json!({
            "events": [
                { "type": "message", "timestamp": 1, "replyToken": "r",
                  "message": { "id": "1", "type": "image",
                               "contentProvider": { "type": "line" } } },
                { "type": "message", "timestamp": 1, "replyToken": "r",
                  "message": { "id": "2", "type": "video", "duration": 60000,
                               "contentProvider": { "type": "external",
                                                    "originalContentUrl": "https://example.com/v.mp4",
                                                    "previewImageUrl": "https://example.com/v.jpg" } } },
                { "type": "message", "timestamp": 1, "replyToken": "r",
                  "message": { "id": "3", "type": "audio", "duration": 1000 } },
                { "type": "message", "timestamp": 1, "replyToken": "r",
                  "message": { "id": "4", "type": "file", "fileName": "a.pdf", "fileSize": 2048 } },
                { "type": "message", "timestamp": 1, "replyToken": "r",
                  "message": { "id": "5", "type": "location", "title": "my location",
                               "address": "Tokyo", "latitude": 35.65910807942215,
                               "longitude": 139.70372892916203 } },
                { "type": "message", "timestamp": 1, "replyToken": "r",
                  "message": { "id": "6", "type": "sticker", "packageId": "1", "stickerId": "1",
                               "stickerResourceType": "STATIC", "keywords": ["hello"] } }
            ]
        }));

        let contents: Vec<&MessageContent> = req
            .events
            .iter()
            .map(|e| match &e.kind {
                EventKind::Message(m) => &m.message,
                other => panic!("expected message event, got {other:?}"),
            })
            .collect();

        let ids: Vec<_> = contents.iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            [Some("1"), Some("2"), Some("3"), Some("4"), Some("5"), Some("6")]
        );

        match contents[0] {
            MessageContent::Image(m) => {
                assert_eq!(m.content_provider.kind, ContentProviderType::Line);
            }
            other => panic!("expected image, got {other:?}"),
        }
        match contents[1] {
            MessageContent::Video(m) => {
                assert_eq!(m.duration, Some(60000));
                assert_eq!(m.content_provider.kind, ContentProviderType::External);
                assert_eq!(
                    m.content_provider.original_content_url.as_deref(),
                    Some("https://example.com/v.mp4")
                );
            }
            other => panic!("expected video, got {other:?}"),
        }
        match contents[2] {
            // Missing contentProvider falls back to the platform-hosted default
            MessageContent::Audio(m) => {
                assert_eq!(m.content_provider.kind, ContentProviderType::Line);
            }
            other => panic!("expected audio, got {other:?}"),
        }
        match contents[3] {
            MessageContent::File(m) => {
                assert_eq!(m.file_name, "a.pdf");
                assert_eq!(m.file_size, 2048);
            }
            other => panic!("expected file, got {other:?}"),
        }
        match contents[4] {
            MessageContent::Location(m) => {
                assert_eq!(m.address.as_deref(), Some("Tokyo"));
                assert!((m.latitude - 35.659_108).abs() < 1e-6);
            }
            other => panic!("expected location, got {other:?}"),
        }
        match contents[5] {
            MessageContent::Sticker(m) => {
                assert_eq!(m.package_id, "1");
                assert_eq!(m.keywords.as_deref(), Some(&["hello".to_string()][..]));
            }
            other => panic!("expected sticker, got {other:?}"),
        }
    }

    #[test]
    fn unknown_types_do_not_fail_the_batch() {
        let req = parse(json!({
            "events": [
                { "type": "memberJoined", "timestamp": 1, "replyToken": "r",
                  "joined": { "members": [] } },
                { "type": "message", "timestamp": 1, "replyToken": "r",
                  "message": { "id": "9", "type": "hologram" } },
                { "type": "follow", "timestamp": 1, "replyToken": "r",
                  "source": { "type": "space", "spaceId": "S1" } }
            ]
        }));

        match &req.events[0].kind {
            EventKind::Unknown(e) => {
                assert_eq!(e.event_type, "memberJoined");
                assert_eq!(e.body["joined"], json!({ "members": [] }));
            }
            other => panic!("expected unknown event, got {other:?}"),
        }
        assert_eq!(req.events[0].event_type(), "memberJoined");
        assert_eq!(req.events[0].reply_token(), Some("r"));
        assert_eq!(req.events[0].timestamp, 1);
        match &req.events[1].kind {
            EventKind::Message(m) => assert!(matches!(m.message, MessageContent::Unknown)),
            other => panic!("expected message event, got {other:?}"),
        }
        assert_eq!(req.events[2].source, Some(Source::Unknown));
    }

    #[test]
    fn standby_events_decode_without_reply_token() {
        let req = parse(json!({
            "events": [
                { "type": "message", "mode": "active", "timestamp": 1, "replyToken": "r1",
                  "message": { "id": "1", "type": "text", "text": "hi" } },
                { "type": "message", "mode": "standby", "timestamp": 2,
                  "message": { "id": "2", "type": "text", "text": "hi" } },
                { "type": "follow", "mode": "standby", "timestamp": 3 }
            ]
        }));

        assert_eq!(req.events.len(), 3);
        let tokens: Vec<_> = req.events.iter().map(Event::reply_token).collect();
        assert_eq!(tokens, [Some("r1"), None, None]);
        assert!(req.events[1].is_standby());
        assert!(matches!(req.events[1].kind, EventKind::Message(_)));
        assert!(matches!(req.events[2].kind, EventKind::Follow(_)));
    }

    #[test]
    fn malformed_entry_does_not_sink_its_neighbours() {
        let req = parse(json!({
            "events": [
                { "type": "follow", "replyToken": "r1" },
                { "timestamp": 2 },
                { "type": 7, "timestamp": 3 },
                { "type": "unfollow", "timestamp": "yesterday" },
                { "type": "message", "timestamp": 4, "replyToken": "r4" },
                "not an object"
            ]
        }));

        // Type-less, non-string-typed and bad-envelope entries are dropped
        assert_eq!(req.events.len(), 2);
        assert!(matches!(req.events[0].kind, EventKind::Follow(_)));
        assert_eq!(req.events[0].reply_token(), Some("r1"));

        // A modelled tag with a body that does not fit is kept raw
        match &req.events[1].kind {
            EventKind::Unknown(e) => assert_eq!(e.event_type, "message"),
            other => panic!("expected unknown event, got {other:?}"),
        }
        assert_eq!(req.events[1].reply_token(), Some("r4"));
    }

    #[test]
    fn events_must_be_an_array() {
        let result = serde_json::from_value::<CallbackRequest>(json!({ "events": 42 }));
        assert!(result.is_err());
    }

    #[test]
    fn null_events_are_skipped() {
        let req = parse(json!({
            "destination": "Ubot",
            "events": [null, { "type": "unfollow", "timestamp": 1 }, null]
        }));
        assert_eq!(req.events.len(), 1);
        assert!(matches!(req.events[0].kind, EventKind::Unfollow));
    }

    #[test]
    fn empty_body_decodes_to_empty_batch() {
        let req = parse(json!({}));
        assert!(req.destination.is_none());
        assert!(req.events.is_empty());
    }

    #[test]
    fn source_addressing() {
        let user = Source::User {
            user_id: "U1".into(),
        };
        let group = Source::Group {
            group_id: "C1".into(),
            user_id: Some("U2".into()),
        };
        let room = Source::Room {
            room_id: "R1".into(),
            user_id: None,
        };

        assert_eq!(user.sender_id(), Some("U1"));
        assert_eq!(group.sender_id(), Some("C1"));
        assert_eq!(group.user_id(), Some("U2"));
        assert_eq!(room.sender_id(), Some("R1"));
        assert_eq!(room.user_id(), None);
    }

    #[test]
    fn redelivery_and_standby_flags() {
        let req = parse(json!({
            "events": [{ "type": "unfollow", "timestamp": 1, "mode": "standby",
                         "deliveryContext": { "isRedelivery": true } }]
        }));
        assert!(req.events[0].is_redelivery());
        assert!(req.events[0].is_standby());
    }
}
