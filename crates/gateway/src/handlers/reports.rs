//! Document generation handlers

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use licitamos_common::{
    auth::AuthContext,
    db::Repository,
    errors::{AppError, Result},
    templates::{print_layout, render, PrintLayout, TemplateKind},
};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// checklist | contrato | proposta
    pub template: String,
    pub client_id: Uuid,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub template: &'static str,
    pub content: String,
    pub print: PrintLayout,
}

/// Render one of the fixed document templates for a client, filled from the
/// caller's profile
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    let kind = TemplateKind::parse(&request.template).ok_or_else(|| AppError::Validation {
        message: format!("unknown template: {}", request.template),
        field: Some("template".into()),
    })?;

    let repo = Repository::new(state.db.clone());
    let client = repo.get_client(auth.user_id, request.client_id).await?;
    let profile = repo.get_profile(auth.user_id).await?;

    let content = render(kind, &client, profile.as_ref(), Utc::now().date_naive());
    let print = print_layout(&content);

    tracing::info!(
        client_id = %client.id,
        user_id = %auth.user_id,
        template = kind.as_str(),
        "Document generated"
    );

    Ok(Json(GenerateResponse {
        template: kind.as_str(),
        content,
        print,
    }))
}
