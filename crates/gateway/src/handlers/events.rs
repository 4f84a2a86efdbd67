//! Agenda event handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::AppState;
use licitamos_common::{
    auth::AuthContext, db::models::Event, db::repository::EventPayload, db::Repository,
    errors::Result,
};

/// List the user's agenda in chronological order
pub async fn list_events(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<Event>>> {
    let repo = Repository::new(state.db.clone());
    let events = repo.list_events(auth.user_id).await?;
    Ok(Json(events))
}

/// Schedule a new event
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(payload): Json<EventPayload>,
) -> Result<(StatusCode, Json<Event>)> {
    let repo = Repository::new(state.db.clone());
    let event = repo.create_event(auth.user_id, payload).await?;

    tracing::info!(
        event_id = %event.id,
        user_id = %auth.user_id,
        event_type = %event.event_type,
        "Event created"
    );

    Ok((StatusCode::CREATED, Json(event)))
}

/// Replace an existing event
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<EventPayload>,
) -> Result<Json<Event>> {
    let repo = Repository::new(state.db.clone());
    let event = repo.update_event(auth.user_id, event_id, payload).await?;

    tracing::info!(
        event_id = %event.id,
        user_id = %auth.user_id,
        "Event updated"
    );

    Ok(Json(event))
}

/// Remove an event from the agenda
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());
    repo.delete_event(auth.user_id, event_id).await?;

    tracing::info!(
        event_id = %event_id,
        user_id = %auth.user_id,
        "Event deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
