//! Message — a single chat message, immutable once returned by the service.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chat message, either sent by the caller or by an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier for this message.
    pub uuid: Uuid,

    /// Text content.
    pub text: String,

    /// When the message was sent.
    pub sent: DateTime<Utc>,
}
