//! Access token - Firma dei JWT che il client usa per collegarsi a Video e Conversations
//!
//! Il formato è quello degli access token Twilio: JWT HS256 firmato con il secret
//! della API key, header `cty = "twilio-fpa;v=1"` e un claim `grants` che contiene
//! l'identità del partecipante e i permessi (video room, servizio di chat).

use crate::core::AppError;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

const TOKEN_CONTENT_TYPE: &str = "twilio-fpa;v=1";

/// Credenziali e parametri per firmare gli access token
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub account_sid: String,
    pub api_key_sid: String,
    pub api_key_secret: String,
    pub conversations_service_sid: String,
    pub ttl_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VideoGrant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatGrant {
    pub service_sid: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Grants {
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoGrant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatGrant>,
}

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessTokenClaims {
    pub jti: String, // "{api_key_sid}-{iat}"
    pub iss: String, // API key SID
    pub sub: String, // account SID
    pub iat: usize,
    pub exp: usize,
    pub grants: Grants,
}

/// Firma un access token per `identity` con un video grant limitato a `room_name`
/// e un chat grant sul servizio Conversations configurato.
#[instrument(skip(settings), fields(identity = %identity, room = %room_name))]
pub fn encode_access_token(
    identity: &str,
    room_name: &str,
    settings: &TokenSettings,
) -> Result<String, AppError> {
    debug!("Encoding access token");
    let iat = Utc::now().timestamp() as usize;
    let exp = iat + settings.ttl_secs as usize;

    let claims = AccessTokenClaims {
        jti: format!("{}-{}", settings.api_key_sid, iat),
        iss: settings.api_key_sid.clone(),
        sub: settings.account_sid.clone(),
        iat,
        exp,
        grants: Grants {
            identity: identity.to_string(),
            video: Some(VideoGrant {
                room: Some(room_name.to_string()),
            }),
            chat: Some(ChatGrant {
                service_sid: settings.conversations_service_sid.clone(),
            }),
        },
    };

    let mut header = Header::new(Algorithm::HS256);
    header.cty = Some(TOKEN_CONTENT_TYPE.to_string());

    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(settings.api_key_secret.as_bytes()),
    )
    .map(|token| {
        info!("Access token encoded successfully");
        token
    })
    .map_err(|e| {
        error!("Failed to encode access token: {:?}", e);
        AppError::internal_server_error("Error in encoding access token")
    })
}

/// Verifica firma, scadenza, issuer e subject di un access token e ne restituisce i claims
#[instrument(skip(token, settings))]
pub fn decode_access_token(
    token: &str,
    settings: &TokenSettings,
) -> Result<AccessTokenClaims, AppError> {
    debug!("Decoding access token");
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[settings.api_key_sid.as_str()]);
    validation.sub = Some(settings.account_sid.clone());

    decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(settings.api_key_secret.as_bytes()),
        &validation,
    )
    .map(|data| {
        debug!("Access token decoded for identity: {}", data.claims.grants.identity);
        data.claims
    })
    .map_err(|e| {
        warn!("Failed to decode access token: {:?}", e);
        AppError::unauthorized("Unable to decode access token")
    })
}
