//! Room — a multi-party chat context hosting one or more agents and a human.
//!
//! Rooms are the only resource the API lets clients create, update, and
//! delete. The client holds no cache: every read re-fetches from the service.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent::Agent;
use crate::message::Message;

/// A chat room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique identifier.
    pub uuid: Uuid,

    /// Display name.
    pub name: String,

    /// When the room was created.
    pub created: DateTime<Utc>,

    /// When the room was last updated.
    pub updated: DateTime<Utc>,

    /// Current lifecycle status.
    pub status: RoomStatus,

    /// Whether agents chime in on each other's messages unprompted.
    pub backchanneling_enabled: bool,

    /// Free-text note shared with the room's agents.
    pub note: String,

    /// Participating agents, in service order.
    #[serde(rename = "nomis")]
    pub agents: Vec<Agent>,
}

/// Lifecycle status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RoomStatus {
    Creating,
    Default,
    Waiting,
    Typing,
    Error,
    InitialNoteError,
    Manual,
}

// ── Wire Types ───────────────────────────────────────────────

/// Wire wrapper for `GET rooms`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RoomList {
    pub rooms: Vec<Room>,
}

/// Request body for `POST rooms`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    /// Display name for the new room.
    pub name: String,

    /// Free-text note shared with the room's agents.
    pub note: String,

    /// Whether agents chime in on each other's messages unprompted.
    pub backchanneling_enabled: bool,

    /// Participating agents — at least 1, at most 10.
    #[serde(rename = "nomiUuids")]
    pub agent_uuids: Vec<Uuid>,
}

/// Partial update for `PUT rooms/{uuid}`.
///
/// Every field is optional; `None` is omitted from the JSON entirely and
/// leaves the server-side value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New shared note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// New backchanneling setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backchanneling_enabled: Option<bool>,

    /// Replacement participant list.
    #[serde(
        rename = "nomiUuids",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub agent_uuids: Option<Vec<Uuid>>,
}

/// Response from `POST rooms/{uuid}/chat`.
///
/// Posting into a room only records the message; replies are requested
/// separately per agent via `POST rooms/{uuid}/chat/request`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomChatResponse {
    /// The caller's message as recorded by the service.
    pub sent_message: Message,
}

/// Request body for `POST rooms/{uuid}/chat/request`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoomReplyRequest {
    /// Which participating agent should reply.
    #[serde(rename = "nomiUuid")]
    pub agent_uuid: Uuid,
}

/// Response from `POST rooms/{uuid}/chat/request`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomReplyResponse {
    /// The requested agent's reply.
    pub reply_message: Message,
}
