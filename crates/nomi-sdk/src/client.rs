//! Nomi API client — typed operations over the HTTPS/JSON service.
//!
//! Every operation funnels through one pipeline: build the request (method,
//! path segments, optional JSON body), dispatch it, then classify the
//! response by status code. 2xx bodies decode into the operation's result
//! type; anything else goes through the error-envelope table in
//! [`crate::error`]. Identifiers are validated as UUIDs locally, so a typo
//! never costs a round-trip.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::agent::{Agent, AgentList, ChatRequest, ChatResponse};
use crate::error::{NomiError, NomiResult, ServiceErrorKind};
use crate::room::{
    CreateRoomRequest, Room, RoomChatResponse, RoomList, RoomReplyRequest, RoomReplyResponse,
    UpdateRoomRequest,
};

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.nomi.ai/v1/";

/// Client for the Nomi API.
///
/// Holds only immutable configuration (credential, base URL) plus a pooled
/// HTTP client. Cloning is cheap and clones can be used concurrently from
/// any number of tasks.
#[derive(Debug, Clone)]
pub struct NomiClient {
    /// API base URL, always ending in a trailing slash.
    base_url: Url,

    /// HTTP client.
    http: Client,

    /// API key, sent verbatim in the `Authorization` header.
    api_key: String,
}

impl NomiClient {
    /// Create a client for the production API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            http: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: &str) -> NomiResult<Self> {
        // Url::join drops the last path segment unless the base ends in '/'.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        self.base_url = base_url;
        Ok(self)
    }

    /// Use a custom HTTP client (timeouts, proxies, connection pools).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    // ── Agent Operations ─────────────────────────────────────

    /// List all agents associated with the account.
    ///
    /// `GET nomis`
    pub async fn list_agents(&self) -> NomiResult<Vec<Agent>> {
        let list: AgentList = self.call(Method::GET, &["nomis"], None).await?;
        Ok(list.agents)
    }

    /// Fetch a single agent.
    ///
    /// `GET nomis/{uuid}`
    pub async fn get_agent(&self, agent_id: &str) -> NomiResult<Agent> {
        let id = parse_identifier(agent_id)?;
        self.call(Method::GET, &["nomis", &id.to_string()], None)
            .await
    }

    /// Send a message to the agent's main chat and wait for the reply.
    ///
    /// `POST nomis/{uuid}/chat`
    pub async fn send_message(
        &self,
        agent_id: &str,
        text: impl Into<String>,
    ) -> NomiResult<ChatResponse> {
        let id = parse_identifier(agent_id)?;
        let body = ChatRequest {
            message_text: text.into(),
        };
        self.call(
            Method::POST,
            &["nomis", &id.to_string(), "chat"],
            Some(encode(&body)?),
        )
        .await
    }

    // ── Room Operations ──────────────────────────────────────

    /// List all rooms associated with the account.
    ///
    /// `GET rooms`
    pub async fn list_rooms(&self) -> NomiResult<Vec<Room>> {
        let list: RoomList = self.call(Method::GET, &["rooms"], None).await?;
        Ok(list.rooms)
    }

    /// Create a room.
    ///
    /// `POST rooms`
    pub async fn create_room(&self, request: &CreateRoomRequest) -> NomiResult<Room> {
        self.call(Method::POST, &["rooms"], Some(encode(request)?))
            .await
    }

    /// Fetch a single room.
    ///
    /// `GET rooms/{uuid}`
    pub async fn get_room(&self, room_id: &str) -> NomiResult<Room> {
        let id = parse_identifier(room_id)?;
        self.call(Method::GET, &["rooms", &id.to_string()], None)
            .await
    }

    /// Partially update a room. `None` fields are left unchanged.
    ///
    /// `PUT rooms/{uuid}`
    pub async fn update_room(
        &self,
        room_id: &str,
        update: &UpdateRoomRequest,
    ) -> NomiResult<Room> {
        let id = parse_identifier(room_id)?;
        self.call(
            Method::PUT,
            &["rooms", &id.to_string()],
            Some(encode(update)?),
        )
        .await
    }

    /// Delete a room.
    ///
    /// `DELETE rooms/{uuid}`
    ///
    /// The service signals success purely by status — 204 with no body — so
    /// nothing is decoded on success. 400 and 404 map onto the standard
    /// error kinds; any other failure status is classified from its body.
    pub async fn delete_room(&self, room_id: &str) -> NomiResult<bool> {
        let id = parse_identifier(room_id)?;
        let (status, body) = self
            .execute(Method::DELETE, &["rooms", &id.to_string()], None)
            .await?;

        match status {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::BAD_REQUEST => Err(NomiError::Service {
                kind: ServiceErrorKind::InvalidRouteParams,
                issues: None,
            }),
            StatusCode::NOT_FOUND => Err(NomiError::Service {
                kind: ServiceErrorKind::RoomNotFound,
                issues: None,
            }),
            _ if status.is_success() => Ok(true),
            _ => Err(NomiError::classify(&body)),
        }
    }

    /// Send a message into a room. The room records it; no agent replies
    /// until one is asked to via [`NomiClient::request_room_reply`].
    ///
    /// `POST rooms/{uuid}/chat`
    pub async fn send_room_message(
        &self,
        room_id: &str,
        text: impl Into<String>,
    ) -> NomiResult<RoomChatResponse> {
        let id = parse_identifier(room_id)?;
        let body = ChatRequest {
            message_text: text.into(),
        };
        self.call(
            Method::POST,
            &["rooms", &id.to_string(), "chat"],
            Some(encode(&body)?),
        )
        .await
    }

    /// Ask a specific participating agent to reply in a room.
    ///
    /// `POST rooms/{uuid}/chat/request`
    pub async fn request_room_reply(
        &self,
        room_id: &str,
        agent_id: &str,
    ) -> NomiResult<RoomReplyResponse> {
        let room = parse_identifier(room_id)?;
        let agent = parse_identifier(agent_id)?;
        let body = RoomReplyRequest { agent_uuid: agent };
        self.call(
            Method::POST,
            &["rooms", &room.to_string(), "chat", "request"],
            Some(encode(&body)?),
        )
        .await
    }

    // ── Internal Pipeline ────────────────────────────────────

    /// Dispatch a request and classify the response.
    ///
    /// 2xx bodies decode into `T`; decode failure is surfaced as
    /// [`NomiError::Decode`], never coerced. Non-2xx bodies go through the
    /// error-envelope table.
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Vec<u8>>,
    ) -> NomiResult<T> {
        let (status, body) = self.execute(method, segments, body).await?;
        if status.is_success() {
            Ok(serde_json::from_slice(&body)?)
        } else {
            Err(NomiError::classify(&body))
        }
    }

    /// Build and send one request, returning the raw status and body bytes.
    ///
    /// Transport failures (DNS, connect, timeout, body read) surface as
    /// [`NomiError::Transport`], distinct from every service-reported error.
    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Vec<u8>>,
    ) -> NomiResult<(StatusCode, Vec<u8>)> {
        let url = self.endpoint(segments)?;

        tracing::debug!(%method, %url, "dispatching request");

        let mut request = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, self.api_key.as_str());
        if let Some(payload) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }

    /// Join path segments onto the base URL. Identifier segments are
    /// validated as UUIDs by the calling operation before they get here.
    fn endpoint(&self, segments: &[&str]) -> NomiResult<Url> {
        Ok(self.base_url.join(&segments.join("/"))?)
    }
}

/// Validate a caller-supplied identifier before any network call.
fn parse_identifier(raw: &str) -> NomiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| NomiError::InvalidIdentifier(raw.to_owned()))
}

/// Encode a request body to JSON bytes.
fn encode<B: Serialize>(body: &B) -> NomiResult<Vec<u8>> {
    Ok(serde_json::to_vec(body)?)
}
