//! # nomi-sdk
//!
//! Typed Rust client for the Nomi API — conversational agents, group chat
//! rooms, and messaging over HTTPS/JSON.
//!
//! ## Architecture
//!
//! Every operation runs through a single pipeline:
//!
//! 1. **Build & dispatch** — method + path segments + optional JSON body,
//!    with the credential in the `Authorization` header. Caller-supplied
//!    identifiers are validated as UUIDs before any request is issued.
//! 2. **Classify** — 2xx bodies decode into the operation's result type;
//!    everything else decodes the service's error envelope and maps its
//!    discriminant tag onto [`NomiError`] through one fixed table.
//!
//! The client is a thin, deterministic translation layer: no retries, no
//! caching, no logging of errors. Resilience policy belongs to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nomi_sdk::NomiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NomiClient::new("your-api-key");
//!
//!     let agents = client.list_agents().await?;
//!     for agent in &agents {
//!         println!("{} ({})", agent.name, agent.uuid);
//!     }
//!
//!     let chat = client
//!         .send_message(&agents[0].uuid.to_string(), "Hello!")
//!         .await?;
//!     println!("{}", chat.reply_message.text);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod client;
pub mod error;
pub mod message;
pub mod room;

// Re-export primary types
pub use agent::{Agent, ChatRequest, ChatResponse, Gender, RelationshipType};
pub use client::{NomiClient, DEFAULT_BASE_URL};
pub use error::{ErrorIssues, NomiError, NomiResult, ServiceErrorKind};
pub use message::Message;
pub use room::{
    CreateRoomRequest, Room, RoomChatResponse, RoomReplyResponse, RoomStatus, UpdateRoomRequest,
};
