//! Participant entity - Partecipante di una conversazione

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Participant {
    pub sid: String,
    pub conversation_sid: String,
    pub identity: Option<String>,
}
