//! Route definitions for the `/setores` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::sector;
use crate::state::AppState;

/// Routes mounted at `/setores`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sector::list).post(sector::create))
        .route("/{id}", put(sector::update).delete(sector::delete))
}
