//! Data model for Telegram chat exports (`result.json`)

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

/// A whole exported chat: header fields plus the message sequence.
///
/// Message order is the export's own order. It usually tracks time but is
/// not guaranteed monotonic; timestamps are the authority for anything
/// time-based.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatHistory {
    /// Chat title as exported
    pub name: String,

    /// Chat kind (e.g. "private_supergroup")
    #[serde(rename = "type")]
    pub kind: String,

    /// Chat identifier
    pub id: i64,

    /// All exported messages, in export order
    pub messages: Vec<Message>,
}

/// One exported message: either a real user message or a service event
/// (join, pin, title change, ...).
#[derive(Debug, Clone)]
pub enum Message {
    User(UserMessage),
    Service(ServiceMessage),
}

impl Message {
    /// Message identifier, unique within one export
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::User(m) => m.id,
            Self::Service(m) => m.id,
        }
    }

    /// Message timestamp (naive, export-local)
    #[must_use]
    pub const fn date(&self) -> NaiveDateTime {
        match self {
            Self::User(m) => m.date,
            Self::Service(m) => m.date,
        }
    }

    /// The user-message payload, if this is one
    #[must_use]
    pub const fn as_user(&self) -> Option<&UserMessage> {
        match self {
            Self::User(m) => Some(m),
            Self::Service(_) => None,
        }
    }
}

// The export tags records with a "type" field: "service" for service events,
// anything else is a user message. Dispatch on the tag by hand so unknown
// types still parse as user messages.
impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_service = value.get("type").and_then(serde_json::Value::as_str) == Some("service");

        if is_service {
            serde_json::from_value(value)
                .map(Self::Service)
                .map_err(serde::de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(Self::User)
                .map_err(serde::de::Error::custom)
        }
    }
}

/// A message written by a chat member
#[derive(Debug, Clone, Deserialize)]
pub struct UserMessage {
    /// Identifier, unique within the export
    pub id: i64,

    /// Send timestamp
    pub date: NaiveDateTime,

    /// Sender display name (absent for deleted accounts)
    #[serde(default, rename = "from")]
    pub from: Option<String>,

    /// Sender identifier (e.g. "user12345678")
    #[serde(default)]
    pub from_id: Option<String>,

    /// Message text, flattened to a plain string (see [`flatten_text`]).
    /// Empty when the message carries only media.
    #[serde(default, deserialize_with = "flatten_text")]
    pub text: String,

    /// Identifier of the message this one replies to, if any. May point at
    /// a message outside the export.
    #[serde(default)]
    pub reply_to_message_id: Option<i64>,

    /// Last edit timestamp
    #[serde(default)]
    pub edited: Option<NaiveDateTime>,

    /// Reactions left on this message
    #[serde(default)]
    pub reactions: Vec<Reaction>,

    /// Emoji of an attached sticker
    #[serde(default)]
    pub sticker_emoji: Option<String>,

    /// Relative path of an attached photo
    #[serde(default)]
    pub photo: Option<String>,
}

/// A service event (chat created, member joined, message pinned, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceMessage {
    /// Identifier, unique within the export
    pub id: i64,

    /// Event timestamp
    pub date: NaiveDateTime,

    /// Who performed the action
    #[serde(default)]
    pub actor: Option<String>,

    /// Actor identifier
    #[serde(default)]
    pub actor_id: Option<String>,

    /// Action label (e.g. "pin_message")
    pub action: String,
}

/// A reaction aggregate on a message
#[derive(Debug, Clone, Deserialize)]
pub struct Reaction {
    /// Reaction kind ("emoji", "custom_emoji", "paid")
    #[serde(rename = "type")]
    pub kind: String,

    /// How many members reacted this way
    pub count: u32,

    /// The emoji itself; absent for custom sticker reactions
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Deserialize the export's `text` field into a plain string.
///
/// The export stores formatted text as a list mixing bare strings with
/// `{type, text}` entity objects; the pieces are contiguous spans and
/// concatenate back into the message text.
fn flatten_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextField {
        Plain(String),
        Rich(Vec<TextPiece>),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextPiece {
        Plain(String),
        Entity { text: String },
    }

    let field = TextField::deserialize(deserializer)?;
    Ok(match field {
        TextField::Plain(s) => s,
        TextField::Rich(pieces) => pieces
            .into_iter()
            .map(|piece| match piece {
                TextPiece::Plain(s) | TextPiece::Entity { text: s } => s,
            })
            .collect(),
    })
}
