//! Room broker library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, Config, auth, config};
pub use services::root;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    use services::*;

    // il client gira su un'altra origin (dev server del frontend)
    Router::new()
        .route("/", get(root))
        .route("/join-room", post(join_room))
        .route("/room-complete", post(complete_room))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
