//! Pipeline (Kanban) board handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use licitamos_common::{
    auth::AuthContext,
    db::models::Bid,
    db::repository::BidPayload,
    db::Repository,
    errors::{AppError, Result},
    metrics,
    pipeline::{Board, BoardCard, BidStatus},
};

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Returned by a status move: whether anything was written, plus the
/// refreshed board so the client can resync in one round trip
#[derive(Serialize)]
pub struct MoveResponse {
    pub moved: bool,
    pub board: Board,
}

async fn load_board(repo: &Repository, user_id: Uuid) -> Result<Board> {
    let today = Utc::now().date_naive();
    let rows = repo.list_bids(user_id).await?;

    let cards = rows
        .into_iter()
        .map(|(bid, client)| {
            BoardCard::annotate(
                bid.id,
                bid.title,
                bid.client_id,
                client.map(|c| c.company_name),
                bid.status,
                bid.value,
                bid.deadline,
                bid.portal,
                today,
            )
        })
        .collect();

    Ok(Board::partition(cards))
}

/// The full board, partitioned into the six fixed columns
pub async fn get_board(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Board>> {
    let repo = Repository::new(state.db.clone());
    Ok(Json(load_board(&repo, auth.user_id).await?))
}

/// Create or update an opportunity; the payload id decides which
pub async fn save_bid(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(payload): Json<BidPayload>,
) -> Result<(StatusCode, Json<Bid>)> {
    let repo = Repository::new(state.db.clone());
    let creating = payload.id.is_none();

    let bid = repo.save_bid(auth.user_id, payload).await?;

    tracing::info!(
        bid_id = %bid.id,
        user_id = %auth.user_id,
        status = %bid.status,
        created = creating,
        "Bid saved"
    );

    let status = if creating {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(bid)))
}

/// Move an opportunity to another column. Dropping a card onto its current
/// column writes nothing and reports `moved: false`.
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(bid_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<MoveResponse>> {
    let status = BidStatus::parse(&request.status).ok_or_else(|| AppError::Validation {
        message: format!("unknown pipeline status: {}", request.status),
        field: Some("status".into()),
    })?;

    let repo = Repository::new(state.db.clone());
    let (bid, moved) = repo.update_bid_status(auth.user_id, bid_id, status).await?;

    if moved {
        metrics::record_bid_moved(status.as_str());
        tracing::info!(
            bid_id = %bid.id,
            user_id = %auth.user_id,
            status = %status,
            "Bid moved"
        );
    }

    let board = load_board(&repo, auth.user_id).await?;
    Ok(Json(MoveResponse { moved, board }))
}

/// Delete an opportunity and return the refreshed board
pub async fn delete_bid(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(bid_id): Path<Uuid>,
) -> Result<Json<Board>> {
    let repo = Repository::new(state.db.clone());
    repo.delete_bid(auth.user_id, bid_id).await?;

    tracing::info!(
        bid_id = %bid_id,
        user_id = %auth.user_id,
        "Bid deleted"
    );

    Ok(Json(load_board(&repo, auth.user_id).await?))
}
