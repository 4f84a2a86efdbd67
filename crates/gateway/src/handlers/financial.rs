//! Financial summary and report handlers

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::AppState;
use licitamos_common::{
    auth::AuthContext,
    db::Repository,
    errors::{AppError, Result},
    finance::{summarize, yearly_report, FinancialSummary, ReportEntry, YearlyReport},
};

/// Won / lost / potential totals over all of the user's opportunities
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<FinancialSummary>> {
    let repo = Repository::new(state.db.clone());
    let rows = repo.list_bids(auth.user_id).await?;

    let summary = summarize(rows.iter().map(|(bid, _)| (bid.status.as_str(), bid.value)));
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Yearly revenue report keyed on bid deadlines, optionally narrowed to a
/// single month
pub async fn report(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ReportQuery>,
) -> Result<Json<YearlyReport>> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    if let Some(month) = query.month {
        if !(1..=12).contains(&month) {
            return Err(AppError::Validation {
                message: format!("month must be between 1 and 12, got {month}"),
                field: Some("month".into()),
            });
        }
    }

    let repo = Repository::new(state.db.clone());
    let rows = repo.list_bids(auth.user_id).await?;

    let report = yearly_report(
        rows.iter().map(|(bid, _)| ReportEntry {
            status: bid.status.as_str(),
            value: bid.value,
            deadline: bid.deadline,
        }),
        year,
        query.month,
    );

    Ok(Json(report))
}
