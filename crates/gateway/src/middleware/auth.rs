//! Bearer token authentication middleware
//!
//! Validates the Authorization header against the shared JWT secret and
//! inserts an `AuthContext` into request extensions for the handler-side
//! extractor to pick up.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use licitamos_common::{
    auth::extract_bearer,
    errors::{AppError, Result},
};

use crate::AppState;

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing Authorization header".to_string(),
        })?;

    let token = extract_bearer(header).ok_or_else(|| AppError::Unauthorized {
        message: "Authorization header must use the Bearer scheme".to_string(),
    })?;

    let request_id = request
        .headers()
        .get(state.config.auth.request_id_header.as_str())
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let context = state.jwt.authenticate(token, request_id)?;
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}
