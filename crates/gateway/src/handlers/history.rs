//! Client interaction history handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use licitamos_common::{
    auth::AuthContext, db::models::ClientHistory, db::Repository, errors::Result,
};

#[derive(Debug, Deserialize)]
pub struct AppendHistoryRequest {
    pub content: String,
}

/// List a client's interaction log in chronological order
pub async fn list_history(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<ClientHistory>>> {
    let repo = Repository::new(state.db.clone());
    let entries = repo.list_history(auth.user_id, client_id).await?;
    Ok(Json(entries))
}

/// Append a note to a client's interaction log
pub async fn append_history(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(client_id): Path<Uuid>,
    Json(request): Json<AppendHistoryRequest>,
) -> Result<(StatusCode, Json<ClientHistory>)> {
    let repo = Repository::new(state.db.clone());
    let entry = repo
        .append_history(auth.user_id, client_id, request.content)
        .await?;

    tracing::info!(
        client_id = %client_id,
        user_id = %auth.user_id,
        "History entry appended"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}
