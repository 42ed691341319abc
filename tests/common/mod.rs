//! Utility condivise dai test di integrazione
//!
//! Oltre a costruire AppState e TestServer, questo modulo avvia una finta REST API
//! del fornitore (room, conversazioni, partecipanti) su una porta effimera locale,
//! così i test esercitano il client HTTP reale senza uscire dalla macchina.

#![allow(dead_code)]

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_test::TestServer;
use room_broker::core::{AppState, Config};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const API_KEY_SID: &str = "SKfake";
pub const API_KEY_SECRET: &str = "fakesecret";
pub const ACCOUNT_SID: &str = "AC00000000000000000000000000000000";
pub const SERVICE_SID: &str = "IS00000000000000000000000000000000";

/// `Basic base64("SKfake:fakesecret")`
const EXPECTED_AUTHORIZATION: &str = "Basic U0tmYWtlOmZha2VzZWNyZXQ=";

#[derive(Debug, Clone)]
pub struct FakeRoom {
    pub sid: String,
    pub unique_name: String,
    pub status: String,
    pub room_type: String,
}

#[derive(Debug, Clone)]
pub struct FakeConversation {
    pub sid: String,
    pub friendly_name: String,
}

#[derive(Debug, Clone)]
pub struct FakeParticipant {
    pub sid: String,
    pub conversation_sid: String,
    pub identity: String,
}

/// Stato della finta API, ispezionabile dai test
#[derive(Debug, Default)]
pub struct FakeVendorState {
    pub rooms: Vec<FakeRoom>,
    pub conversations: HashMap<String, FakeConversation>,
    pub participants: Vec<FakeParticipant>,
    /// Log delle chiamate ricevute, es. "POST /v1/Rooms"
    pub calls: Vec<String>,
    /// DELETE delle conversazioni risponde 500
    pub fail_deletes: bool,
    /// GET delle room risponde 200 con un body non interpretabile
    pub malformed_room_bodies: bool,
    counter: u32,
}

impl FakeVendorState {
    fn next_sid(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{}{:032x}", prefix, self.counter)
    }

    pub fn seed_room(&mut self, unique_name: &str) -> String {
        let sid = self.next_sid("RM");
        self.rooms.push(FakeRoom {
            sid: sid.clone(),
            unique_name: unique_name.to_string(),
            status: "in-progress".to_string(),
            room_type: "go".to_string(),
        });
        sid
    }

    pub fn seed_conversation(&mut self, friendly_name: &str) -> String {
        let sid = self.next_sid("CH");
        self.conversations.insert(
            sid.clone(),
            FakeConversation {
                sid: sid.clone(),
                friendly_name: friendly_name.to_string(),
            },
        );
        sid
    }

    pub fn room_by_name(&self, unique_name: &str) -> Option<&FakeRoom> {
        self.rooms.iter().find(|r| r.unique_name == unique_name)
    }

    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

pub type SharedVendor = Arc<Mutex<FakeVendorState>>;

/// Finta API avviata in background
pub struct FakeVendor {
    pub base_url: String,
    pub state: SharedVendor,
}

fn not_found(resource: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "code": 20404,
            "message": format!("The requested resource {} was not found", resource),
            "more_info": "https://www.twilio.com/docs/errors/20404",
            "status": 404
        })),
    )
        .into_response()
}

fn check_auth(headers: &HeaderMap) -> Result<(), Response> {
    match headers.get("authorization").and_then(|h| h.to_str().ok()) {
        Some(value) if value == EXPECTED_AUTHORIZATION => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "code": 20003,
                "message": "Authenticate",
                "more_info": "https://www.twilio.com/docs/errors/20003",
                "status": 401
            })),
        )
            .into_response()),
    }
}

fn room_json(room: &FakeRoom) -> Value {
    json!({
        "sid": room.sid,
        "unique_name": room.unique_name,
        "status": room.status,
        "type": room.room_type,
    })
}

fn conversation_json(conversation: &FakeConversation) -> Value {
    json!({
        "sid": conversation.sid,
        "friendly_name": conversation.friendly_name,
        "chat_service_sid": SERVICE_SID,
    })
}

async fn fetch_room(
    State(vendor): State<SharedVendor>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let mut vendor = vendor.lock().unwrap();
    vendor.calls.push(format!("GET /v1/Rooms/{}", id));
    if vendor.malformed_room_bodies {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    // per unique name si trovano solo le room in corso, per SID tutte
    let room = vendor
        .rooms
        .iter()
        .find(|r| r.sid == id || (r.unique_name == id && r.status == "in-progress"));
    match room {
        Some(room) => Json(room_json(room)).into_response(),
        None => not_found(&format!("/Rooms/{}", id)),
    }
}

#[derive(Deserialize)]
struct CreateRoomForm {
    #[serde(rename = "UniqueName")]
    unique_name: String,
    #[serde(rename = "Type")]
    room_type: String,
}

async fn create_room(
    State(vendor): State<SharedVendor>,
    headers: HeaderMap,
    Form(form): Form<CreateRoomForm>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let mut vendor = vendor.lock().unwrap();
    vendor.calls.push("POST /v1/Rooms".to_string());
    let sid = vendor.next_sid("RM");
    let room = FakeRoom {
        sid,
        unique_name: form.unique_name,
        status: "in-progress".to_string(),
        room_type: form.room_type,
    };
    let body = room_json(&room);
    vendor.rooms.push(room);
    (StatusCode::CREATED, Json(body)).into_response()
}

#[derive(Deserialize)]
struct UpdateRoomForm {
    #[serde(rename = "Status")]
    status: String,
}

async fn update_room(
    State(vendor): State<SharedVendor>,
    headers: HeaderMap,
    Path(sid): Path<String>,
    Form(form): Form<UpdateRoomForm>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let mut vendor = vendor.lock().unwrap();
    vendor.calls.push(format!("POST /v1/Rooms/{}", sid));
    match vendor.rooms.iter_mut().find(|r| r.sid == sid) {
        Some(room) => {
            room.status = form.status;
            Json(room_json(room)).into_response()
        }
        None => not_found(&format!("/Rooms/{}", sid)),
    }
}

#[derive(Deserialize)]
struct CreateConversationForm {
    #[serde(rename = "FriendlyName")]
    friendly_name: String,
}

async fn create_conversation(
    State(vendor): State<SharedVendor>,
    headers: HeaderMap,
    Form(form): Form<CreateConversationForm>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let mut vendor = vendor.lock().unwrap();
    vendor.calls.push("POST /v1/Conversations".to_string());
    let sid = vendor.seed_conversation(&form.friendly_name);
    let body = conversation_json(&vendor.conversations[&sid]);
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn delete_conversation(
    State(vendor): State<SharedVendor>,
    headers: HeaderMap,
    Path(sid): Path<String>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let mut vendor = vendor.lock().unwrap();
    vendor.calls.push(format!("DELETE /v1/Conversations/{}", sid));
    if vendor.fail_deletes {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "code": 20500,
                "message": "Internal Server Error",
                "more_info": "https://www.twilio.com/docs/errors/20500",
                "status": 500
            })),
        )
            .into_response();
    }
    match vendor.conversations.remove(&sid) {
        Some(_) => {
            vendor.participants.retain(|p| p.conversation_sid != sid);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(&format!("/Conversations/{}", sid)),
    }
}

#[derive(Deserialize)]
struct CreateParticipantForm {
    #[serde(rename = "Identity")]
    identity: String,
}

async fn create_participant(
    State(vendor): State<SharedVendor>,
    headers: HeaderMap,
    Path(sid): Path<String>,
    Form(form): Form<CreateParticipantForm>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let mut vendor = vendor.lock().unwrap();
    vendor
        .calls
        .push(format!("POST /v1/Conversations/{}/Participants", sid));
    if !vendor.conversations.contains_key(&sid) {
        return not_found(&format!("/Conversations/{}", sid));
    }
    let participant = FakeParticipant {
        sid: vendor.next_sid("MB"),
        conversation_sid: sid,
        identity: form.identity,
    };
    let body = json!({
        "sid": participant.sid,
        "conversation_sid": participant.conversation_sid,
        "identity": participant.identity,
    });
    vendor.participants.push(participant);
    (StatusCode::CREATED, Json(body)).into_response()
}

/// Avvia la finta API su 127.0.0.1 con porta scelta dal sistema operativo
pub async fn spawn_fake_vendor() -> FakeVendor {
    let state: SharedVendor = Arc::new(Mutex::new(FakeVendorState::default()));

    let app = Router::new()
        .route("/v1/Rooms", post(create_room))
        .route("/v1/Rooms/{id}", get(fetch_room).post(update_room))
        .route("/v1/Conversations", post(create_conversation))
        .route(
            "/v1/Conversations/{sid}",
            axum::routing::delete(delete_conversation),
        )
        .route("/v1/Conversations/{sid}/Participants", post(create_participant))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake vendor");
    let addr = listener.local_addr().expect("Fake vendor has no address");
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Fake vendor crashed");
    });

    FakeVendor {
        base_url: format!("http://{}", addr),
        state,
    }
}

/// Configurazione di test che punta entrambe le API al base url indicato
pub fn create_test_config(base_url: &str, api_key_secret: &str) -> Config {
    create_test_config_with(base_url, api_key_secret, &[])
}

/// Come `create_test_config`, con variabili aggiuntive o sovrascritte
pub fn create_test_config_with(
    base_url: &str,
    api_key_secret: &str,
    overrides: &[(&'static str, &str)],
) -> Config {
    let mut vars: HashMap<&str, String> = HashMap::from([
        ("TWILIO_ACCOUNT_SID", ACCOUNT_SID.to_string()),
        ("TWILIO_API_KEY_SID", API_KEY_SID.to_string()),
        ("TWILIO_API_KEY_SECRET", api_key_secret.to_string()),
        ("DEFAULT_CONVERSATIONS_SERVICE_SID", SERVICE_SID.to_string()),
        ("TWILIO_VIDEO_BASE_URL", base_url.to_string()),
        ("TWILIO_CONVERSATIONS_BASE_URL", base_url.to_string()),
        ("APP_ENV", "test".to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key, value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("Invalid test config")
}

/// Crea un AppState per i test
///
/// # Arguments
/// * `base_url` - Base url della finta API del fornitore
///
/// # Returns
/// Arc<AppState> configurato con le credenziali di test
pub fn create_test_state(base_url: &str) -> Arc<AppState> {
    let config = create_test_config(base_url, API_KEY_SECRET);
    Arc::new(AppState::new(&config).expect("Failed to build AppState"))
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
///
/// # Returns
/// TestServer configurato e pronto per eseguire richieste
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = room_broker::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}
