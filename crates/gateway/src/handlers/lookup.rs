//! External registry lookup handlers (CEP / CNPJ)

use axum::{
    extract::{Path, State},
    Json,
};

use crate::AppState;
use licitamos_common::{
    auth::AuthContext,
    errors::Result,
    lookup::{Address, CompanyLookup},
    metrics,
};

/// Resolve a postal code to an address
pub async fn cep(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(cep): Path<String>,
) -> Result<Json<Address>> {
    let result = state.lookup.fetch_cep(&cep).await;
    metrics::record_lookup("cep", result.is_ok());
    Ok(Json(result?))
}

/// Resolve a company registration number to its registry record
pub async fn cnpj(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(cnpj): Path<String>,
) -> Result<Json<CompanyLookup>> {
    let result = state.lookup.fetch_cnpj(&cnpj).await;
    metrics::record_lookup("cnpj", result.is_ok());
    Ok(Json(result?))
}
