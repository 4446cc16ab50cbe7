pub mod health;
pub mod sector;
pub mod transaction;

use axum::Router;

use crate::state::AppState;

/// Build the inventory route tree.
///
/// Mounted at the root (no version prefix): existing clients call these
/// paths directly.
///
/// ```text
/// /setores                 list, create
/// /setores/{id}            rename, delete
/// /movimentacoes           list, create
/// /movimentacoes/{id}      overwrite, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/setores", sector::router())
        .nest("/movimentacoes", transaction::router())
}
