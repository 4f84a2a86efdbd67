//! Client management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::AppState;
use licitamos_common::{
    auth::AuthContext,
    db::models::{Client, ClientDocument},
    db::repository::ClientPayload,
    db::Repository,
    errors::Result,
    expiry::{classify, ExpiryStatus},
};

/// A client with its documents, each annotated with the derived expiry state
#[derive(Serialize)]
pub struct ClientResponse {
    #[serde(flatten)]
    pub client: Client,
    pub documents: Vec<DocumentResponse>,
}

#[derive(Serialize)]
pub struct DocumentResponse {
    #[serde(flatten)]
    pub document: ClientDocument,
    pub expiry_status: ExpiryStatus,
}

impl DocumentResponse {
    pub fn annotate(document: ClientDocument, today: chrono::NaiveDate) -> Self {
        let expiry_status = classify(document.expiration_date, today);
        Self {
            document,
            expiry_status,
        }
    }
}

/// List all clients with their documents, ordered by company name
pub async fn list_clients(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<ClientResponse>>> {
    let repo = Repository::new(state.db.clone());
    let today = Utc::now().date_naive();

    let clients = repo.list_clients(auth.user_id).await?;
    let response = clients
        .into_iter()
        .map(|(client, documents)| ClientResponse {
            client,
            documents: documents
                .into_iter()
                .map(|d| DocumentResponse::annotate(d, today))
                .collect(),
        })
        .collect();

    Ok(Json(response))
}

/// Create or update a client; the payload id decides which
pub async fn save_client(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(payload): Json<ClientPayload>,
) -> Result<(StatusCode, Json<Client>)> {
    let repo = Repository::new(state.db.clone());
    let creating = payload.id.is_none();

    let client = repo.save_client(auth.user_id, payload).await?;

    tracing::info!(
        client_id = %client.id,
        user_id = %auth.user_id,
        created = creating,
        "Client saved"
    );

    let status = if creating {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(client)))
}

/// Delete a client and its dependent rows
pub async fn delete_client(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(client_id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());
    repo.delete_client(auth.user_id, client_id).await?;

    tracing::info!(
        client_id = %client_id,
        user_id = %auth.user_id,
        "Client deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
