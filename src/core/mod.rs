//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Access token (JWT)
//! - Configurazione
//! - Gestione errori
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod error;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{AccessTokenClaims, TokenSettings, decode_access_token, encode_access_token};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
