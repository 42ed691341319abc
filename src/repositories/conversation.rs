//! ConversationRepository - Accesso alle conversazioni (Twilio Conversations, /v1/Conversations)

use super::client::{VendorClient, VendorError};
use super::traits::{Create, Delete};
use crate::dtos::CreateConversationDTO;
use crate::entities::Conversation;
use tracing::instrument;

pub struct ConversationRepository {
    client: VendorClient,
    base_url: String,
}

impl ConversationRepository {
    pub fn new(client: VendorClient, base_url: String) -> ConversationRepository {
        Self { client, base_url }
    }
}

impl Create<Conversation, CreateConversationDTO> for ConversationRepository {
    #[instrument(skip(self))]
    async fn create(&self, data: &CreateConversationDTO) -> Result<Conversation, VendorError> {
        let url = VendorClient::endpoint(&self.base_url, &["v1", "Conversations"])?;
        self.client.post_form(url, data).await
    }
}

impl Delete<str> for ConversationRepository {
    #[instrument(skip(self))]
    async fn delete(&self, sid: &str) -> Result<(), VendorError> {
        let url = VendorClient::endpoint(&self.base_url, &["v1", "Conversations", sid])?;
        self.client.delete(url).await
    }
}
