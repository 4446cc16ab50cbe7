//! Sector entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::DbId;

/// A row from the `setores` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Sector {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a sector. Any client-supplied `id` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSector {
    pub name: String,
}

/// DTO for renaming a sector.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSector {
    pub name: String,
}

/// Outcome of a sector rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorRename {
    /// Whether a sector row with the id existed.
    pub renamed: bool,
    /// Movements whose `nome_setor` snapshot was rewritten.
    pub transactions_updated: u64,
}

/// Outcome of a sector deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorDeletion {
    pub deleted: bool,
    /// Movements still pointing at the sector; they are left in place.
    pub linked_transactions: i64,
}
