//! End-to-end tests of the request/classification pipeline against a mock
//! HTTP server. Nothing here touches the real service.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nomi_sdk::{
    CreateRoomRequest, NomiClient, NomiError, RoomStatus, ServiceErrorKind, UpdateRoomRequest,
};

const AGENT_UUID: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";
const ROOM_UUID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

fn agent_json() -> serde_json::Value {
    json!({
        "uuid": AGENT_UUID,
        "name": "Ada",
        "gender": "Female",
        "relationshipType": "Friend",
        "created": "2024-01-15T10:30:00Z"
    })
}

fn room_json() -> serde_json::Value {
    json!({
        "uuid": ROOM_UUID,
        "name": "test-sdk",
        "created": "2024-03-01T12:00:00Z",
        "updated": "2024-03-01T12:05:00Z",
        "status": "Default",
        "backchannelingEnabled": false,
        "note": "x",
        "nomis": [agent_json()]
    })
}

fn message_json(text: &str) -> serde_json::Value {
    json!({
        "uuid": "a8098c1a-f86e-11da-bd1a-00112444be1e",
        "text": text,
        "sent": "2024-03-01T12:06:00Z"
    })
}

fn client_for(server: &MockServer) -> NomiClient {
    NomiClient::new("test-key")
        .with_base_url(&format!("{}/v1/", server.uri()))
        .expect("mock server URI is a valid base URL")
}

// ── Local validation ─────────────────────────────────────────

#[tokio::test]
async fn invalid_identifier_fails_without_a_network_call() {
    let server = MockServer::start().await;
    // Spy: any request reaching the server fails the test on drop.
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.get_agent("not-a-uuid").await.unwrap_err();
    assert!(matches!(err, NomiError::InvalidIdentifier(ref s) if s == "not-a-uuid"));

    let err = client.send_message("42", "hi").await.unwrap_err();
    assert!(matches!(err, NomiError::InvalidIdentifier(_)));

    let err = client.get_room("").await.unwrap_err();
    assert!(matches!(err, NomiError::InvalidIdentifier(_)));

    let err = client.delete_room("nope").await.unwrap_err();
    assert!(matches!(err, NomiError::InvalidIdentifier(_)));

    let err = client
        .update_room("nope", &UpdateRoomRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NomiError::InvalidIdentifier(_)));

    let err = client.send_room_message("nope", "hi").await.unwrap_err();
    assert!(matches!(err, NomiError::InvalidIdentifier(_)));

    // Both identifiers are checked before dispatch.
    let err = client
        .request_room_reply(ROOM_UUID, "not-a-uuid")
        .await
        .unwrap_err();
    assert!(matches!(err, NomiError::InvalidIdentifier(_)));
}

// ── Agent operations ─────────────────────────────────────────

#[tokio::test]
async fn list_agents_decodes_the_wire_wrapper() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/nomis"))
        .and(header("Authorization", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "nomis": [agent_json()] })))
        .expect(1)
        .mount(&server)
        .await;

    let agents = client_for(&server).list_agents().await.unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].name, "Ada");
    assert_eq!(agents[0].uuid.to_string(), AGENT_UUID);
}

#[tokio::test]
async fn get_agent_hits_the_uuid_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/nomis/{AGENT_UUID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(agent_json()))
        .expect(1)
        .mount(&server)
        .await;

    let agent = client_for(&server).get_agent(AGENT_UUID).await.unwrap();
    assert_eq!(agent.name, "Ada");
}

#[tokio::test]
async fn send_message_posts_json_and_decodes_the_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/nomis/{AGENT_UUID}/chat")))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "messageText": "Hello!" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentMessage": message_json("Hello!"),
            "replyMessage": message_json("Hi! Lovely to hear from you."),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chat = client_for(&server)
        .send_message(AGENT_UUID, "Hello!")
        .await
        .unwrap();
    assert_eq!(chat.sent_message.text, "Hello!");
    assert_eq!(chat.reply_message.text, "Hi! Lovely to hear from you.");
}

// ── Room operations ──────────────────────────────────────────

#[tokio::test]
async fn create_room_decodes_the_created_room() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/rooms"))
        .and(body_json(json!({
            "name": "test-sdk",
            "note": "x",
            "backchannelingEnabled": false,
            "nomiUuids": [AGENT_UUID],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(room_json()))
        .expect(1)
        .mount(&server)
        .await;

    let room = client_for(&server)
        .create_room(&CreateRoomRequest {
            name: "test-sdk".into(),
            note: "x".into(),
            backchanneling_enabled: false,
            agent_uuids: vec![AGENT_UUID.parse().unwrap()],
        })
        .await
        .unwrap();

    assert_eq!(room.name, "test-sdk");
    assert_eq!(room.uuid.to_string(), ROOM_UUID);
    assert_eq!(room.status, RoomStatus::Default);
}

#[tokio::test]
async fn create_room_maps_insufficient_plan() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/rooms"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "error": { "type": "InsufficientPlan" } })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_room(&CreateRoomRequest {
            name: "test-sdk".into(),
            note: "x".into(),
            backchanneling_enabled: false,
            agent_uuids: vec![AGENT_UUID.parse().unwrap()],
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NomiError::Service {
            kind: ServiceErrorKind::InsufficientPlan,
            ..
        }
    ));
}

#[tokio::test]
async fn list_rooms_decodes_the_wire_wrapper() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rooms": [room_json()] })))
        .mount(&server)
        .await;

    let rooms = client_for(&server).list_rooms().await.unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].agents[0].name, "Ada");
}

#[tokio::test]
async fn update_room_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/v1/rooms/{ROOM_UUID}")))
        .and(body_json(json!({ "note": "new note" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(room_json()))
        .expect(1)
        .mount(&server)
        .await;

    let update = UpdateRoomRequest {
        note: Some("new note".into()),
        ..Default::default()
    };
    let room = client_for(&server)
        .update_room(ROOM_UUID, &update)
        .await
        .unwrap();
    assert_eq!(room.uuid.to_string(), ROOM_UUID);
}

#[tokio::test]
async fn delete_room_status_outcomes() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/v1/rooms/{ROOM_UUID}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    // 204 with an empty body: success, no decode attempted.
    let deleted = client_for(&server).delete_room(ROOM_UUID).await.unwrap();
    assert!(deleted);
}

#[tokio::test]
async fn delete_room_maps_400_and_404_without_a_body() {
    let server = MockServer::start().await;
    let other_room = "a8098c1a-f86e-11da-bd1a-00112444be1e";
    Mock::given(method("DELETE"))
        .and(path(format!("/v1/rooms/{ROOM_UUID}")))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/v1/rooms/{other_room}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.delete_room(ROOM_UUID).await.unwrap_err();
    assert!(matches!(
        err,
        NomiError::Service {
            kind: ServiceErrorKind::InvalidRouteParams,
            ..
        }
    ));

    let err = client.delete_room(other_room).await.unwrap_err();
    assert!(matches!(
        err,
        NomiError::Service {
            kind: ServiceErrorKind::RoomNotFound,
            ..
        }
    ));
}

#[tokio::test]
async fn room_chat_and_requested_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/rooms/{ROOM_UUID}/chat")))
        .and(body_json(json!({ "messageText": "Hi everyone" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentMessage": message_json("Hi everyone"),
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/rooms/{ROOM_UUID}/chat/request")))
        .and(body_json(json!({ "nomiUuid": AGENT_UUID })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "replyMessage": message_json("Hello from Ada"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let sent = client
        .send_room_message(ROOM_UUID, "Hi everyone")
        .await
        .unwrap();
    assert_eq!(sent.sent_message.text, "Hi everyone");

    let reply = client
        .request_room_reply(ROOM_UUID, AGENT_UUID)
        .await
        .unwrap();
    assert_eq!(reply.reply_message.text, "Hello from Ada");
}

// ── Classification edge cases ────────────────────────────────

#[tokio::test]
async fn unknown_error_tag_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/nomis/{AGENT_UUID}")))
        .respond_with(
            ResponseTemplate::new(418)
                .set_body_json(json!({ "error": { "type": "TeapotDetected" } })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).get_agent(AGENT_UUID).await.unwrap_err();
    match err {
        NomiError::UnknownService { tag, body } => {
            assert_eq!(tag, "TeapotDetected");
            assert!(body.contains("TeapotDetected"));
        }
        other => panic!("expected UnknownService, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_error_envelope_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/nomis"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_agents().await.unwrap_err();
    assert!(matches!(err, NomiError::Decode(_)));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/nomis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let err = client_for(&server).list_agents().await.unwrap_err();
    assert!(matches!(err, NomiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Nothing listens on the discard port.
    let client = NomiClient::new("test-key")
        .with_base_url("http://127.0.0.1:9/v1/")
        .unwrap();

    let err = client.list_agents().await.unwrap_err();
    assert!(matches!(err, NomiError::Transport(_)));
}
