//! Movement (`movimentacoes`) entity model and DTOs.
//!
//! `transaction_type` and `category` are stored as free text. The store does
//! not validate them, or any other field; the client views do.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{DbId, EpochMillis};
use stockroom_core::wire;

/// A row from the `movimentacoes` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: DbId,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub sector_id: Option<DbId>,
    pub sector_name: Option<String>,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub quantity: i32,
    pub asset_id: Option<String>,
    pub timestamp: EpochMillis,
}

/// Full-row payload used for both insert and overwrite.
///
/// `sectorId` may arrive as a number or a numeric string; an empty or missing
/// `sectorId` / `assetId` is stored as NULL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    #[serde(rename = "type")]
    pub transaction_type: String,
    #[serde(default, deserialize_with = "wire::optional_db_id")]
    pub sector_id: Option<DbId>,
    #[serde(default)]
    pub sector_name: Option<String>,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub quantity: i32,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub asset_id: Option<String>,
    pub timestamp: EpochMillis,
}
