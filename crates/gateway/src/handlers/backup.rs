//! Backup export and import handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use licitamos_common::{
    auth::AuthContext,
    backup::{parse, BackupDocument},
    db::repository::ImportCounts,
    db::Repository,
    errors::Result,
    metrics,
};

/// Export every client and bid owned by the caller as one JSON document
pub async fn export(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<BackupDocument>> {
    let repo = Repository::new(state.db.clone());
    let (clients, bids) = repo.export_backup(auth.user_id).await?;
    let document = BackupDocument::new(clients, bids);

    metrics::record_backup_exported();
    tracing::info!(
        user_id = %auth.user_id,
        clients = document.clients.len(),
        bids = document.bids.len(),
        "Backup exported"
    );

    Ok(Json(document))
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub imported: ImportCounts,
}

/// Import a backup file, upserting rows by id. The raw body is shape-checked
/// before any database write.
pub async fn import(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ImportResponse>> {
    let document = parse(body)?;

    let repo = Repository::new(state.db.clone());
    let imported = repo
        .import_backup(auth.user_id, document.clients, document.bids)
        .await?;

    metrics::record_backup_imported("clients", imported.clients);
    metrics::record_backup_imported("bids", imported.bids);
    tracing::info!(
        user_id = %auth.user_id,
        clients = imported.clients,
        bids = imported.bids,
        "Backup imported"
    );

    Ok(Json(ImportResponse { imported }))
}
