//! ParticipantRepository - Partecipanti di una conversazione

use super::client::{VendorClient, VendorError};
use super::traits::Create;
use crate::dtos::CreateParticipantDTO;
use crate::entities::Participant;
use tracing::instrument;

pub struct ParticipantRepository {
    client: VendorClient,
    base_url: String,
}

impl ParticipantRepository {
    pub fn new(client: VendorClient, base_url: String) -> ParticipantRepository {
        Self { client, base_url }
    }
}

impl Create<Participant, CreateParticipantDTO> for ParticipantRepository {
    #[instrument(skip(self), fields(conversation_sid = %data.conversation_sid))]
    async fn create(&self, data: &CreateParticipantDTO) -> Result<Participant, VendorError> {
        let url = VendorClient::endpoint(
            &self.base_url,
            &["v1", "Conversations", data.conversation_sid.as_str(), "Participants"],
        )?;
        self.client.post_form(url, data).await
    }
}
