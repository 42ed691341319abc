//! RoomRepository - Accesso alle video room (Twilio Video, /v1/Rooms)

use super::client::{VendorClient, VendorError};
use super::traits::{Create, Read, Update};
use crate::dtos::{CreateRoomDTO, UpdateRoomDTO};
use crate::entities::Room;
use tracing::{debug, instrument};

pub struct RoomRepository {
    client: VendorClient,
    base_url: String,
}

impl RoomRepository {
    pub fn new(client: VendorClient, base_url: String) -> RoomRepository {
        Self { client, base_url }
    }
}

impl Read<Room, str> for RoomRepository {
    /// Il fornitore accetta sia il SID (RM...) sia lo unique name come identificativo
    #[instrument(skip(self))]
    async fn read(&self, sid_or_unique_name: &str) -> Result<Option<Room>, VendorError> {
        let url = VendorClient::endpoint(&self.base_url, &["v1", "Rooms", sid_or_unique_name])?;
        match self.client.get::<Room>(url).await {
            Ok(room) => {
                debug!("Found room {} ({})", room.unique_name, room.sid);
                Ok(Some(room))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl Create<Room, CreateRoomDTO> for RoomRepository {
    #[instrument(skip(self))]
    async fn create(&self, data: &CreateRoomDTO) -> Result<Room, VendorError> {
        let url = VendorClient::endpoint(&self.base_url, &["v1", "Rooms"])?;
        self.client.post_form(url, data).await
    }
}

impl Update<Room, UpdateRoomDTO, str> for RoomRepository {
    #[instrument(skip(self))]
    async fn update(&self, sid: &str, data: &UpdateRoomDTO) -> Result<Room, VendorError> {
        let url = VendorClient::endpoint(&self.base_url, &["v1", "Rooms", sid])?;
        self.client.post_form(url, data).await
    }
}
