//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A key/value setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Setting {
    /// Setting name (e.g., "delete_timeout_seconds").
    pub key: String,
    /// Stored value, always text.
    pub value: String,
}

/// A bot user, identified by their platform user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Platform user id.
    pub user_id: i64,
    /// Handle, if the user has one.
    pub username: Option<String>,
    /// Given name as first seen.
    pub first_name: Option<String>,
    /// Family name as first seen.
    pub last_name: Option<String>,
    /// Set by moderation.
    pub blocked: bool,
    /// Last interaction timestamp.
    pub last_seen: String,
}

/// Profile data observed on an interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Platform user id.
    pub user_id: i64,
    /// Current handle; replaces the stored one on every interaction.
    pub username: Option<String>,
    /// Given name, stored on first contact only.
    pub first_name: Option<String>,
    /// Family name, stored on first contact only.
    pub last_name: Option<String>,
}

/// A registered media reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Chat holding the original message.
    pub storage_chat_id: i64,
    /// Message id of the original within the storage chat.
    pub storage_message_id: i64,
    /// Provider-assigned stable file id.
    pub file_unique_id: String,
    /// Media kind (e.g., "video", "document", "animation").
    pub file_type: String,
    /// Size in bytes, 0 when unknown.
    pub file_size: i64,
    /// External retrieval handle. Unique and never rewritten.
    pub token: String,
    /// Channels a user must belong to before delivery, in order.
    #[sqlx(json)]
    pub required_channels: Vec<i64>,
    /// Soft-disable flag.
    pub active: bool,
    /// Number of deliveries made.
    pub views: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// Input for registering a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFile {
    /// Chat holding the original message.
    pub storage_chat_id: i64,
    /// Message id of the original within the storage chat.
    pub storage_message_id: i64,
    /// Provider-assigned stable file id.
    pub file_unique_id: String,
    /// Media kind (e.g., "video", "document", "animation").
    pub file_type: String,
    /// Defaults to 0 when the provider did not report a size.
    pub file_size: Option<i64>,
    /// Pre-generated retrieval handle; must not be in use.
    pub token: String,
    /// Channels a user must belong to before delivery, in order.
    pub required_channels: Vec<i64>,
}

/// Condensed file row for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileSummary {
    /// File ID.
    pub id: i64,
    /// Retrieval handle.
    pub token: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Number of deliveries made.
    pub views: i64,
    /// Soft-disable flag.
    pub active: bool,
}

/// One copy of a file sent to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Delivery {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Delivered file.
    pub file_id: i64,
    /// Recipient.
    pub user_id: i64,
    /// Message id of the copy in the user's chat, if the send returned one.
    pub sent_message_id: Option<i64>,
    /// Set once the delivered copy has been removed.
    pub deleted_at: Option<String>,
}
