//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene le entità che rispecchiano le risorse del fornitore (Twilio).
//! Non c'è persistenza locale: ogni entity è identificata dal SID assegnato dal fornitore
//! e viene deserializzata direttamente dalle risposte JSON della sua REST API.

pub mod conversation;
pub mod enums;
pub mod participant;
pub mod room;

// Re-exports per facilitare l'import
pub use conversation::Conversation;
pub use enums::{RoomStatus, RoomType};
pub use participant::Participant;
pub use room::Room;
