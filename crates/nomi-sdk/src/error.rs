//! Error taxonomy for the Nomi API client.
//!
//! Every failure surfaces as a [`NomiError`]: local identifier validation,
//! transport, JSON decode, or a service-reported error classified from the
//! envelope the API attaches to non-2xx responses.
//!
//! Classification is table-driven: the envelope's `type` tag is looked up in
//! one fixed table ([`ServiceErrorKind::from_tag`]) shared by every
//! operation. A well-formed envelope with an unrecognized tag is a distinct
//! outcome ([`NomiError::UnknownService`]) from an envelope that fails to
//! decode ([`NomiError::Decode`]).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when calling the Nomi API.
#[derive(Debug, Error)]
pub enum NomiError {
    /// A caller-supplied identifier is not a valid UUID. Raised locally;
    /// no request is issued.
    #[error("invalid identifier: `{0}` is not a valid UUID")]
    InvalidIdentifier(String),

    /// A caller-supplied base URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP transport error (DNS, connect, TLS, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON encode/decode error — a malformed success body or a malformed
    /// error envelope. Never coerced into a service error.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service rejected the call with a recognized error tag.
    #[error("{kind}")]
    Service {
        /// Which error the service reported.
        kind: ServiceErrorKind,
        /// Diagnostic detail attached by the service, when present.
        issues: Option<ErrorIssues>,
    },

    /// The service returned a well-formed envelope carrying a tag this
    /// client does not recognize. The raw tag and body are preserved.
    #[error("unknown service error `{tag}`")]
    UnknownService {
        /// The unrecognized discriminant tag.
        tag: String,
        /// The full response body, for diagnostics.
        body: String,
    },
}

/// Nomi Result type alias.
pub type NomiResult<T> = Result<T, NomiError>;

impl NomiError {
    /// Classify a non-success response body into a typed error.
    ///
    /// Decodes the error envelope, then routes its tag through the fixed
    /// table. Envelope decode failure surfaces as [`NomiError::Decode`]
    /// rather than a guessed service error.
    pub(crate) fn classify(body: &[u8]) -> Self {
        let envelope: ErrorEnvelope = match serde_json::from_slice(body) {
            Ok(envelope) => envelope,
            Err(err) => return NomiError::Decode(err),
        };

        match ServiceErrorKind::from_tag(&envelope.error.tag) {
            Some(kind) => NomiError::Service {
                kind,
                issues: envelope.error.issues,
            },
            None => NomiError::UnknownService {
                tag: envelope.error.tag,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }
}

/// Service-reported error kinds, one per discriminant tag the API publishes.
///
/// Display text follows the service documentation for each tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceErrorKind {
    /// Tag `NomiNotFound`.
    #[error("the specified agent was not found; it may not exist or may not be associated with this account")]
    AgentNotFound,

    /// Tag `InvalidRouteParams`.
    #[error("the id parameter is not a valid UUID")]
    InvalidRouteParams,

    /// Tag `InvalidContentType`.
    #[error("the Content-Type header is not application/json")]
    InvalidContentType,

    /// Tag `NoReply`.
    #[error("the agent did not reply within the service's response window")]
    NoReply,

    /// Tag `NomiStillResponding`.
    #[error("the agent is already replying to a user message and cannot reply to this one")]
    StillResponding,

    /// Tag `NomiNotReady`.
    #[error("the agent was created moments ago and cannot receive messages yet")]
    NotReady,

    /// Tag `OngoingVoiceCallDetected`.
    #[error("the agent is in a voice call and cannot respond to messages")]
    OngoingVoiceCall,

    /// Tag `MessageLengthLimitExceeded`.
    #[error("the message exceeds the maximum length for this account's plan")]
    MessageTooLong,

    /// Tag `LimitExceeded`.
    #[error("the daily message quota for this account is exhausted")]
    QuotaExceeded,

    /// Tag `InvalidBody`.
    #[error("the request body is invalid; see the attached issues for detail")]
    InvalidBody,

    /// Tag `InsufficientPlan`.
    #[error("the account plan does not include the rooms feature")]
    InsufficientPlan,

    /// Tag `ExceededRoomLimit`.
    #[error("the account has reached its maximum number of rooms")]
    RoomLimitExceeded,

    /// Tag `RoomNomiCountTooSmall`.
    #[error("nomiUuids must contain at least one agent associated with this account")]
    RoomAgentCountTooSmall,

    /// Tag `RoomNomiCountTooLarge`.
    #[error("nomiUuids must contain at most ten agents associated with this account")]
    RoomAgentCountTooLarge,

    /// Tag `RoomNotFound`.
    #[error("the specified room was not found; it may not exist or may not be associated with this account")]
    RoomNotFound,

    /// Tag `RoomNomiNotFound`.
    #[error("the specified agent is not a participant of the specified room")]
    RoomAgentNotFound,

    /// Tag `RoomStillCreating`.
    #[error("the room was created moments ago and cannot receive messages yet")]
    RoomStillCreating,

    /// Tag `RoomNomiNotReadyForMessage`.
    #[error("the agent is already replying to a user message in this room and cannot reply to this one")]
    RoomAgentNotReady,
}

impl ServiceErrorKind {
    /// Look up a kind from the envelope's discriminant tag.
    ///
    /// Returns `None` for tags this client does not know; callers surface
    /// those as [`NomiError::UnknownService`] rather than guessing.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "NomiNotFound" => Some(Self::AgentNotFound),
            "InvalidRouteParams" => Some(Self::InvalidRouteParams),
            "InvalidContentType" => Some(Self::InvalidContentType),
            "NoReply" => Some(Self::NoReply),
            "NomiStillResponding" => Some(Self::StillResponding),
            "NomiNotReady" => Some(Self::NotReady),
            "OngoingVoiceCallDetected" => Some(Self::OngoingVoiceCall),
            "MessageLengthLimitExceeded" => Some(Self::MessageTooLong),
            "LimitExceeded" => Some(Self::QuotaExceeded),
            "InvalidBody" => Some(Self::InvalidBody),
            "InsufficientPlan" => Some(Self::InsufficientPlan),
            "ExceededRoomLimit" => Some(Self::RoomLimitExceeded),
            "RoomNomiCountTooSmall" => Some(Self::RoomAgentCountTooSmall),
            "RoomNomiCountTooLarge" => Some(Self::RoomAgentCountTooLarge),
            "RoomNotFound" => Some(Self::RoomNotFound),
            "RoomNomiNotFound" => Some(Self::RoomAgentNotFound),
            "RoomStillCreating" => Some(Self::RoomStillCreating),
            "RoomNomiNotReadyForMessage" => Some(Self::RoomAgentNotReady),
            _ => None,
        }
    }
}

// ── Wire Types ───────────────────────────────────────────────

/// The envelope the service wraps around every non-2xx response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: EnvelopeBody,
}

/// The inner error object: a discriminant tag plus optional diagnostics.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EnvelopeBody {
    #[serde(rename = "type")]
    pub tag: String,

    #[serde(default)]
    pub issues: Option<ErrorIssues>,
}

/// Structured diagnostic detail inside the error envelope.
///
/// Diagnostic only — never consulted by control flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorIssues {
    /// Validation code (e.g. `invalid_type`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// The type the service expected at `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,

    /// The type the service received at `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,

    /// Path to the offending field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Which validation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
}
