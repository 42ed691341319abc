//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene i DTOs usati in due direzioni:
//! - verso il client browser (JSON camelCase, vedi `room`)
//! - verso la REST API del fornitore (form-encoded PascalCase, vedi `vendor`)

pub mod room;
pub mod vendor;

// Re-exports per facilitare l'import
pub use room::{JoinRoomResponseDTO, RoomCompleteResponseDTO, RoomRequestDTO};
pub use vendor::{
    CreateConversationDTO, CreateParticipantDTO, CreateRoomDTO, UpdateRoomDTO, VendorErrorDTO,
};
