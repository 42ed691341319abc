//! Room entity - Video room del fornitore

use super::enums::{RoomStatus, RoomType};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Room {
    pub sid: String,
    pub unique_name: String,
    pub status: RoomStatus,
    // `type` è una parola riservata, quindi rinominiamo il campo
    #[serde(rename = "type")]
    pub room_type: RoomType,
}
