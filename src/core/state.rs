//! Application State - Stato globale dell'applicazione
//!
//! Contiene i repository verso il fornitore e i parametri di firma dei token.
//! Lo stato è in sola lettura: nessun lock, viene condiviso tramite `Arc`.

use crate::core::Config;
use crate::core::auth::TokenSettings;
use crate::entities::RoomType;
use crate::repositories::{
    ConversationRepository, ParticipantRepository, RoomRepository, VendorClient, VendorError,
};

/// Stato globale dell'applicazione condiviso tra tutte le route
pub struct AppState {
    /// Repository per le video room
    pub room: RoomRepository,

    /// Repository per le conversazioni di chat
    pub conversation: ConversationRepository,

    /// Repository per i partecipanti delle conversazioni
    pub participant: ParticipantRepository,

    /// Credenziali per firmare gli access token
    pub token: TokenSettings,

    /// Tipo delle room create da join-room
    pub room_type: RoomType,
}

impl AppState {
    /// Crea una nuova istanza di AppState a partire dalla configurazione.
    /// Tutti i repository condividono un unico client HTTP.
    ///
    /// # Arguments
    /// * `config` - Configurazione caricata all'avvio
    ///
    /// # Returns
    /// Nuova istanza di AppState, oppure errore se il client HTTP non può essere costruito
    pub fn new(config: &Config) -> Result<Self, VendorError> {
        let client = VendorClient::new(config.api_key_sid.clone(), config.api_key_secret.clone())?;
        Ok(Self {
            room: RoomRepository::new(client.clone(), config.video_base_url.clone()),
            conversation: ConversationRepository::new(
                client.clone(),
                config.conversations_base_url.clone(),
            ),
            participant: ParticipantRepository::new(client, config.conversations_base_url.clone()),
            token: config.token_settings(),
            room_type: config.room_type,
        })
    }
}
