//! Handlers for the `/setores` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use stockroom_core::types::DbId;
use stockroom_db::models::sector::{CreateSector, Sector, UpdateSector};
use stockroom_db::repositories::SectorRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::{SectorDeleted, SectorRenamed};
use crate::state::AppState;

/// GET /setores
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Sector>>> {
    let sectors = SectorRepo::list(&state.pool).await?;
    Ok(Json(sectors))
}

/// POST /setores
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSector>,
) -> AppResult<(StatusCode, Json<Sector>)> {
    let sector = SectorRepo::create(&state.pool, &input).await?;
    tracing::info!(sector_id = sector.id, name = %sector.name, "Sector created");
    Ok((StatusCode::CREATED, Json(sector)))
}

/// PUT /setores/{id}
///
/// Also rewrites the sector name snapshot on every movement registered
/// against it.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSector>,
) -> AppResult<Json<SectorRenamed>> {
    let outcome = SectorRepo::rename(&state.pool, id, &input).await?;
    tracing::info!(
        sector_id = id,
        renamed = outcome.renamed,
        transactions_updated = outcome.transactions_updated,
        "Sector renamed"
    );
    Ok(Json(SectorRenamed {
        success: true,
        transactions_updated: outcome.transactions_updated,
    }))
}

/// DELETE /setores/{id}
///
/// Movements pointing at the sector are kept as they are.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SectorDeleted>> {
    let outcome = SectorRepo::delete(&state.pool, id).await?;
    tracing::info!(
        sector_id = id,
        deleted = outcome.deleted,
        linked_transactions = outcome.linked_transactions,
        "Sector deleted"
    );
    Ok(Json(SectorDeleted {
        success: true,
        linked_transactions: outcome.linked_transactions,
    }))
}
