//! Client document handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::handlers::clients::DocumentResponse;
use crate::AppState;
use licitamos_common::{
    auth::AuthContext,
    db::repository::DocumentPayload,
    db::Repository,
    errors::Result,
};

/// List a client's documents with derived expiry state
pub async fn list_documents(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<DocumentResponse>>> {
    let repo = Repository::new(state.db.clone());
    let today = Utc::now().date_naive();

    let documents = repo.list_documents(auth.user_id, client_id).await?;
    let response = documents
        .into_iter()
        .map(|d| DocumentResponse::annotate(d, today))
        .collect();

    Ok(Json(response))
}

/// Attach a tracked document to a client
pub async fn add_document(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<DocumentPayload>,
) -> Result<(StatusCode, Json<DocumentResponse>)> {
    let repo = Repository::new(state.db.clone());
    let today = Utc::now().date_naive();

    let document = repo.add_document(auth.user_id, client_id, payload).await?;

    tracing::info!(
        document_id = %document.id,
        client_id = %client_id,
        user_id = %auth.user_id,
        "Document added"
    );

    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse::annotate(document, today)),
    ))
}

/// Remove a tracked document
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(document_id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());
    repo.delete_document(auth.user_id, document_id).await?;

    tracing::info!(
        document_id = %document_id,
        user_id = %auth.user_id,
        "Document deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
