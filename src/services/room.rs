//! Room services - Orchestrazione di room, conversazioni e access token
//!
//! Ogni handler esegue una breve catena sequenziale di chiamate al fornitore:
//! - join-room: cerca/crea la room -> crea la conversazione -> aggiunge il partecipante -> firma il token
//! - room-complete: chiude la room -> elimina la conversazione

use crate::core::{AppError, AppState, encode_access_token};
use crate::dtos::{
    CreateConversationDTO, CreateParticipantDTO, CreateRoomDTO, JoinRoomResponseDTO,
    RoomCompleteResponseDTO, RoomRequestDTO, UpdateRoomDTO,
};
use crate::entities::{Conversation, RoomStatus};
use crate::repositories::{Create, Delete, Read, Update};
use axum::extract::{Json, State, rejection::JsonRejection};
use std::sync::Arc;
use tracing::{Span, debug, field, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

const MISSING_ROOM_NAME: &str = "Must include roomName argument.";
const MISSING_CONVERSATION_SID: &str = "Must include conversationSid to join an existing room.";

/// Estrae il nome della room dal body e valida il resto dei campi.
/// Un body assente, non JSON o con tipi sbagliati vale come roomName mancante.
fn require_room_name(
    payload: Result<Json<RoomRequestDTO>, JsonRejection>,
) -> Result<(String, RoomRequestDTO), AppError> {
    let Json(body) = payload.map_err(|rejection| {
        warn!("Unreadable request body: {}", rejection.body_text());
        AppError::bad_request(MISSING_ROOM_NAME).with_details(rejection.body_text())
    })?;
    let room_name = body.room_name.clone().ok_or_else(|| {
        warn!("Request without roomName");
        AppError::bad_request(MISSING_ROOM_NAME)
    })?;
    body.validate()?;
    Span::current().record("room", room_name.as_str());
    Ok((room_name, body))
}

#[instrument(skip(state, payload), fields(room = field::Empty))]
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RoomRequestDTO>, JsonRejection>,
) -> Result<Json<JoinRoomResponseDTO>, AppError> {
    debug!("Joining room");
    // 1. Validare il body: roomName obbligatorio, conversationSid opzionale ma con formato SID
    // 2. Generare un'identità casuale per il partecipante
    // 3. Cercare la room o crearla insieme alla sua conversazione
    // 4. Firmare un access token con video grant sulla room e chat grant sul servizio
    let (room_name, body) = require_room_name(payload)?;
    let identity = Uuid::new_v4().to_string();

    let conversation_sid_created =
        find_or_create_room(&state, &identity, &room_name, body.conversation_sid.as_deref())
            .await?;

    let token = encode_access_token(&identity, &room_name, &state.token)?;

    info!("Issued access token for identity {}", identity);
    Ok(Json(JoinRoomResponseDTO {
        token,
        conversation_sid_created,
    }))
}

/// Se la room esiste aggiunge `identity` alla conversazione indicata dal client.
/// Altrimenti crea room e conversazione e aggiunge `identity` a quest'ultima.
///
/// # Returns
/// * `Ok(Some(sid))` - SID della conversazione appena creata
/// * `Ok(None)` - La room esisteva già, nessuna conversazione creata
#[instrument(skip(state))]
pub async fn find_or_create_room(
    state: &AppState,
    identity: &str,
    room_name: &str,
    conversation_sid: Option<&str>,
) -> Result<Option<String>, AppError> {
    if let Some(room) = state.room.read(room_name).await? {
        debug!("Room {} already exists with sid {}", room_name, room.sid);
        let conversation_sid = conversation_sid.ok_or_else(|| {
            warn!("Existing room {} joined without conversationSid", room_name);
            AppError::bad_request(MISSING_CONVERSATION_SID)
        })?;
        add_participant(state, identity, conversation_sid).await?;
        return Ok(None);
    }

    // la room non esiste (20404): la creiamo
    let room = state
        .room
        .create(&CreateRoomDTO {
            unique_name: room_name.to_string(),
            room_type: state.room_type,
        })
        .await?;
    info!("Created room {} ({})", room.unique_name, room.sid);

    let conversation = create_conversation(state, identity, room_name).await?;
    Ok(Some(conversation.sid))
}

/// Crea una conversazione con friendly name uguale al nome della room e vi aggiunge `identity`
#[instrument(skip(state))]
pub async fn create_conversation(
    state: &AppState,
    identity: &str,
    room_name: &str,
) -> Result<Conversation, AppError> {
    let conversation = state
        .conversation
        .create(&CreateConversationDTO {
            friendly_name: room_name.to_string(),
        })
        .await?;
    info!("Created conversation {} for room {}", conversation.sid, room_name);

    add_participant(state, identity, &conversation.sid).await?;
    Ok(conversation)
}

#[instrument(skip(state))]
pub async fn add_participant(
    state: &AppState,
    identity: &str,
    conversation_sid: &str,
) -> Result<(), AppError> {
    let participant = state
        .participant
        .create(&CreateParticipantDTO {
            conversation_sid: conversation_sid.to_string(),
            identity: identity.to_string(),
        })
        .await?;
    info!(
        "Added participant {} to conversation {}",
        participant.sid, participant.conversation_sid
    );
    Ok(())
}

#[instrument(skip(state, payload), fields(room = field::Empty))]
pub async fn complete_room(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RoomRequestDTO>, JsonRejection>,
) -> Result<Json<RoomCompleteResponseDTO>, AppError> {
    debug!("Completing room");
    // 1. Validare il body
    // 2. Recuperare la room tramite unique name, 404 se non esiste
    // 3. Portare la room nello stato "completed"
    // 4. Eliminare la conversazione associata, se indicata
    let (room_name, body) = require_room_name(payload)?;

    let room = state.room.read(room_name.as_str()).await?.ok_or_else(|| {
        warn!("Room {} not found", room_name);
        AppError::not_found("Room not found")
    })?;

    let updated = state
        .room
        .update(
            &room.sid,
            &UpdateRoomDTO {
                status: RoomStatus::Completed,
            },
        )
        .await?;
    info!("Room {} ({}) is now {}", updated.unique_name, updated.sid, updated.status);

    if let Some(conversation_sid) = body.conversation_sid.as_deref() {
        match state.conversation.delete(conversation_sid).await {
            Ok(()) => info!("Deleted conversation {}", conversation_sid),
            Err(e) if e.is_not_found() => {
                warn!("Conversation {} was already deleted", conversation_sid)
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(Json(RoomCompleteResponseDTO {
        status: updated.status,
    }))
}
