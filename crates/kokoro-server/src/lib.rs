//! Kokoro HTTP API server (Axum).
//!
//! A thin proxy in front of the completion API: `/api/chat` forwards a
//! message history, parses the emotion tag out of the reply, records the
//! exchange, and feeds the training logs; `/api/stats` reports aggregate
//! counts.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    routes::api_routes().with_state(state)
}
