//! Vendor DTOs - Parametri form-encoded e payload di errore della REST API Twilio
//!
//! La REST API accetta i parametri in `application/x-www-form-urlencoded`
//! con nomi in PascalCase (`UniqueName`, `FriendlyName`, ...).

use crate::entities::{RoomStatus, RoomType};
use serde::{Deserialize, Serialize};

/// DTO per creare una nuova video room
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRoomDTO {
    pub unique_name: String,
    #[serde(rename = "Type")]
    pub room_type: RoomType,
}

/// DTO per aggiornare una room (l'unica transizione ammessa è verso "completed")
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRoomDTO {
    pub status: RoomStatus,
}

/// DTO per creare una conversazione
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct CreateConversationDTO {
    pub friendly_name: String,
}

/// DTO per aggiungere un partecipante a una conversazione
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct CreateParticipantDTO {
    // va nel path, non nel form
    #[serde(skip)]
    pub conversation_sid: String,
    pub identity: String,
}

/// Corpo JSON restituito dal fornitore per le risposte non 2xx
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VendorErrorDTO {
    pub code: Option<u32>,
    pub message: Option<String>,
    pub more_info: Option<String>,
    pub status: Option<u16>,
}
