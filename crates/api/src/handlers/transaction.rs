//! Handlers for the `/movimentacoes` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use stockroom_core::types::DbId;
use stockroom_db::models::transaction::{Transaction, TransactionInput};
use stockroom_db::repositories::TransactionRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::{TransactionAck, TransactionCreated};
use crate::state::AppState;

/// GET /movimentacoes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Transaction>>> {
    let transactions = TransactionRepo::list(&state.pool).await?;
    Ok(Json(transactions))
}

/// POST /movimentacoes
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<TransactionInput>,
) -> AppResult<(StatusCode, Json<TransactionCreated>)> {
    let created = TransactionRepo::create(&state.pool, &input).await?;
    tracing::info!(transaction_id = created.id, "Transaction registered");
    Ok((
        StatusCode::CREATED,
        Json(TransactionCreated {
            success: true,
            id: created.id,
        }),
    ))
}

/// PUT /movimentacoes/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<TransactionInput>,
) -> AppResult<Json<TransactionAck>> {
    let matched = TransactionRepo::update(&state.pool, id, &input).await?;
    if !matched {
        tracing::debug!(transaction_id = id, "Update matched no transaction");
    }
    Ok(Json(TransactionAck { sucesso: true }))
}

/// DELETE /movimentacoes/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<TransactionAck>> {
    let removed = TransactionRepo::delete(&state.pool, id).await?;
    if !removed {
        tracing::debug!(transaction_id = id, "Delete matched no transaction");
    }
    Ok(Json(TransactionAck { sucesso: true }))
}
