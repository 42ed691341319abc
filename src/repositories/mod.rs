//! Repositories module - Coordinatore per l'accesso alle risorse del fornitore
//!
//! Ogni repository incapsula gli endpoint REST di una singola risorsa (room, conversazione,
//! partecipante). Tutti condividono lo stesso [`VendorClient`] e quindi lo stesso pool HTTP.

// Dichiarazione dei sotto-moduli
pub mod client;
pub mod conversation;
pub mod participant;
pub mod room;
pub mod traits;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, Update};

pub use client::{NOT_FOUND_CODE, VendorClient, VendorError};
pub use conversation::ConversationRepository;
pub use participant::ParticipantRepository;
pub use room::RoomRepository;
