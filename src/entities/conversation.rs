//! Conversation entity - Conversazione di chat associata a una room

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Conversation {
    pub sid: String,
    pub friendly_name: Option<String>,
    pub chat_service_sid: Option<String>,
}
