//! User/company profile handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::AppState;
use licitamos_common::{
    auth::AuthContext,
    db::models::Profile,
    db::repository::ProfilePayload,
    db::Repository,
    errors::{AppError, Result},
};

const THEMES: [&str; 3] = ["light", "dark", "system"];

/// The caller's profile; `null` until one has been saved
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Option<Profile>>> {
    let repo = Repository::new(state.db.clone());
    let profile = repo.get_profile(auth.user_id).await?;
    Ok(Json(profile))
}

/// Create or replace the caller's profile
pub async fn save_profile(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<Profile>> {
    let repo = Repository::new(state.db.clone());
    let profile = repo.save_profile(auth.user_id, payload).await?;

    tracing::info!(user_id = %auth.user_id, "Profile saved");

    Ok(Json(profile))
}

#[derive(Debug, Deserialize)]
pub struct UpdateThemeRequest {
    pub theme: String,
}

/// Update only the display-mode preference
pub async fn update_theme(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<UpdateThemeRequest>,
) -> Result<Json<Profile>> {
    if !THEMES.contains(&request.theme.as_str()) {
        return Err(AppError::Validation {
            message: format!("theme must be one of {THEMES:?}, got {}", request.theme),
            field: Some("theme".into()),
        });
    }

    let repo = Repository::new(state.db.clone());
    let profile = repo.update_theme(auth.user_id, request.theme).await?;
    Ok(Json(profile))
}
