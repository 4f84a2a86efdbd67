//! Dashboard handlers

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;
use licitamos_common::{
    auth::AuthContext,
    db::Repository,
    errors::Result,
    expiry::{dashboard_stats, DashboardStats},
    finance::{summarize, FinancialSummary},
};

/// Headline dashboard numbers: client/document counters plus the financial
/// summary, computed fresh on every load
#[derive(Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub documents: DashboardStats,
    pub active_bids: u64,
    pub finance: FinancialSummary,
}

pub async fn stats(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<DashboardResponse>> {
    let repo = Repository::new(state.db.clone());
    let today = Utc::now().date_naive();

    let clients = repo.list_clients(auth.user_id).await?;
    let expirations: Vec<Vec<chrono::NaiveDate>> = clients
        .iter()
        .map(|(_, documents)| documents.iter().map(|d| d.expiration_date).collect())
        .collect();
    let documents = dashboard_stats(expirations.iter().map(|dates| dates.iter()), today);

    let bids = repo.list_bids(auth.user_id).await?;
    let finance = summarize(bids.iter().map(|(bid, _)| (bid.status.as_str(), bid.value)));
    let active_bids = finance.potential.count;

    Ok(Json(DashboardResponse {
        documents,
        active_bids,
        finance,
    }))
}
