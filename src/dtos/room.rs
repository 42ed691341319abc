//! Room DTOs - Payload scambiati con il client per join-room e room-complete

use crate::entities::RoomStatus;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

lazy_static! {
    /// SID di una conversazione: prefisso "CH" seguito da 32 cifre esadecimali
    pub static ref CONVERSATION_SID_RE: Regex = Regex::new(r"^CH[0-9a-fA-F]{32}$").unwrap();
}

/// Il client invia "" quando non ha ancora una conversazione salvata,
/// quindi stringhe vuote e null valgono entrambe come campo assente.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Body comune di POST /join-room e POST /room-complete
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequestDTO {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 128, message = "roomName must be at most 128 characters"))]
    pub room_name: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(regex(path = *CONVERSATION_SID_RE, message = "conversationSid is not a valid conversation SID"))]
    pub conversation_sid: Option<String>,
}

/// Risposta di POST /join-room
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomResponseDTO {
    pub token: String,
    /// Valorizzato solo quando la room è stata appena creata insieme alla sua conversazione
    pub conversation_sid_created: Option<String>,
}

/// Risposta di POST /room-complete
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RoomCompleteResponseDTO {
    pub status: RoomStatus,
}
