//! HTTP boundary for gridcal: axum routes over a SQLite-backed event store.

pub mod db;
pub mod routes;
pub mod state;

use axum::Router;

pub use crate::state::AppState;

/// Build the full API router. Split out of `main` so tests can drive the
/// routes without binding a socket.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::events::router())
        .merge(routes::settings::router())
        .merge(routes::view::router())
        .with_state(state)
}
