//! Agent — a conversational entity associated with the caller's account.
//!
//! The service names these "nomis" on the wire; this crate exposes them as
//! [`Agent`]s. Agents are created and configured server-side only — the API
//! never mutates them.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Message;

/// A conversational agent (wire name "nomi").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique identifier.
    pub uuid: Uuid,

    /// Display name.
    pub name: String,

    /// Gender presentation.
    pub gender: Gender,

    /// The relationship configured for this agent.
    pub relationship_type: RelationshipType,

    /// When the agent was created.
    pub created: DateTime<Utc>,
}

/// Gender presentation of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Gender {
    Male,
    Female,
    /// Serialized as `"Non Binary"` (with a space) on the wire.
    #[serde(rename = "Non Binary")]
    NonBinary,
}

/// Relationship type configured for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RelationshipType {
    Mentor,
    Friend,
    Romantic,
}

// ── Wire Types ───────────────────────────────────────────────

/// Wire wrapper for `GET nomis`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AgentList {
    #[serde(rename = "nomis")]
    pub agents: Vec<Agent>,
}

/// Request body for `POST nomis/{uuid}/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The message to send to the agent's main chat.
    pub message_text: String,
}

/// Response from `POST nomis/{uuid}/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// The caller's message as recorded by the service.
    pub sent_message: Message,

    /// The agent's reply.
    pub reply_message: Message,
}
