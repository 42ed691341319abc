use crate::core::auth::TokenSettings;
use crate::entities::RoomType;
use dotenv::dotenv;
use std::env;
use tracing::{info, warn};

const MAX_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub account_sid: String,
    pub api_key_sid: String,
    pub api_key_secret: String,
    pub conversations_service_sid: String,
    pub server_host: String,
    pub server_port: u16,
    pub token_ttl_secs: u64,
    pub room_type: RoomType,
    pub video_base_url: String,
    pub conversations_base_url: String,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Costruisce la configurazione da una funzione di lookup chiave -> valore.
    /// `from_env` la usa con `std::env`, i test con una mappa.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("{} must be set in .env file", key))
        };

        let account_sid = required("TWILIO_ACCOUNT_SID")?;
        let api_key_sid = required("TWILIO_API_KEY_SID")?;
        let api_key_secret = required("TWILIO_API_KEY_SECRET")?;
        let conversations_service_sid = required("DEFAULT_CONVERSATIONS_SERVICE_SID")?;

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let token_ttl_secs = lookup("ACCESS_TOKEN_TTL_SECS")
            .unwrap_or_else(|| "3600".to_string())
            .parse::<u64>()
            .ok()
            .filter(|ttl| (1..=MAX_TOKEN_TTL_SECS).contains(ttl))
            .ok_or_else(|| {
                format!(
                    "Invalid ACCESS_TOKEN_TTL_SECS: must be between 1 and {}",
                    MAX_TOKEN_TTL_SECS
                )
            })?;

        let room_type = lookup("VIDEO_ROOM_TYPE")
            .unwrap_or_else(|| "go".to_string())
            .parse::<RoomType>()
            .map_err(|e| format!("Invalid VIDEO_ROOM_TYPE: {}", e))?;

        let video_base_url = lookup("TWILIO_VIDEO_BASE_URL")
            .unwrap_or_else(|| "https://video.twilio.com".to_string());

        let conversations_base_url = lookup("TWILIO_CONVERSATIONS_BASE_URL")
            .unwrap_or_else(|| "https://conversations.twilio.com".to_string());

        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());

        Ok(Config {
            account_sid,
            api_key_sid,
            api_key_secret,
            conversations_service_sid,
            server_host,
            server_port,
            token_ttl_secs,
            room_type,
            video_base_url,
            conversations_base_url,
            app_env,
        })
    }

    /// Parametri di firma degli access token
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            account_sid: self.account_sid.clone(),
            api_key_sid: self.api_key_sid.clone(),
            api_key_secret: self.api_key_secret.clone(),
            conversations_service_sid: self.conversations_service_sid.clone(),
            ttl_secs: self.token_ttl_secs,
        }
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!("Server Configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   Server Address: {}:{}", self.server_host, self.server_port);
        info!("   Account SID: {}", Self::mask(&self.account_sid));
        info!("   API Key SID: {}", Self::mask(&self.api_key_sid));
        info!("   Conversations Service: {}", Self::mask(&self.conversations_service_sid));
        info!("   Video Room Type: {}", self.room_type);
        info!("   Access Token TTL: {}s", self.token_ttl_secs);
        info!("   Video API: {}", self.video_base_url);
        info!("   Conversations API: {}", self.conversations_base_url);
        if self.app_env == "production" && self.video_base_url != "https://video.twilio.com" {
            warn!("   Video API base url overridden in production");
        }
    }

    /// Maschera un identificativo per il logging, lasciando visibile solo il prefisso
    fn mask(value: &str) -> String {
        let prefix: String = value.chars().take(4).collect();
        format!("{}***", prefix)
    }
}
