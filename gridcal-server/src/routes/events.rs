//! Event CRUD and range-query endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use gridcal_core::select::select_in_window;
use gridcal_core::{Event, EventPatch, EventStore, NewEvent};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

/// Query string for GET /api/events
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub user_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// GET /api/events?start=..&end=..&userId=.. - events overlapping the range
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    let candidates = state
        .store
        .events_in_range(query.user_id, query.start, query.end)?;

    // Storage filters loosely on text timestamps; re-check the half-open
    // overlap here.
    let events: Vec<Event> = select_in_window(&candidates, query.start, query.end)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(events))
}

/// GET /api/events/:id
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Event>, AppError> {
    let event = state
        .store
        .event(id)?
        .ok_or_else(|| AppError::not_found(format!("Event not found: {id}")))?;
    Ok(Json(event))
}

/// POST /api/events
async fn create_event(
    State(state): State<AppState>,
    Json(draft): Json<NewEvent>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let event = state.store.create_event(draft)?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/:id - partial update, only supplied fields override
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<EventPatch>,
) -> Result<Json<Event>, AppError> {
    let event = state
        .store
        .update_event(id, patch)?
        .ok_or_else(|| AppError::not_found(format!("Event not found: {id}")))?;
    Ok(Json(event))
}

/// DELETE /api/events/:id
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_event(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("Event not found: {id}")))
    }
}
