//! Per-user settings endpoints

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use gridcal_core::{CalendarSettings, EventStore, SettingsPatch};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/settings", get(get_settings).post(update_settings))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: i64,
}

/// GET /api/settings?userId=.. - stored settings or the defaults
async fn get_settings(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<CalendarSettings>, AppError> {
    Ok(Json(state.store.settings(query.user_id)?))
}

/// POST /api/settings?userId=.. - merge the supplied fields into the stored
/// row, creating it on first update
async fn update_settings(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<CalendarSettings>, AppError> {
    Ok(Json(state.store.update_settings(query.user_id, patch)?))
}
