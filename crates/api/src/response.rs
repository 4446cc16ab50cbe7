//! Acknowledgement bodies returned by mutating endpoints.
//!
//! Field names (including the Portuguese ones) are part of the wire contract
//! existing clients read, so they are spelled out rather than derived.

use serde::Serialize;
use stockroom_core::types::DbId;

/// `PUT /setores/{id}` response.
#[derive(Debug, Serialize)]
pub struct SectorRenamed {
    pub success: bool,
    #[serde(rename = "movimentacoes_atualizadas")]
    pub transactions_updated: u64,
}

/// `DELETE /setores/{id}` response.
#[derive(Debug, Serialize)]
pub struct SectorDeleted {
    pub success: bool,
    #[serde(rename = "movimentacoes_vinculadas")]
    pub linked_transactions: i64,
}

/// `POST /movimentacoes` response.
#[derive(Debug, Serialize)]
pub struct TransactionCreated {
    pub success: bool,
    pub id: DbId,
}

/// `PUT` / `DELETE /movimentacoes/{id}` response.
#[derive(Debug, Serialize)]
pub struct TransactionAck {
    pub sucesso: bool,
}
