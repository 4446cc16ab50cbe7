//! Inventory domain: movement direction, item category and the typed
//! sector / transaction records seen by clients.
//!
//! The wire and the store encode both enums as Portuguese upper-case text
//! (`ENTRADA`, `SAIDA`, `PATRIMONIO`, `CARGA`); those strings are kept bit-exact
//! for compatibility with existing rows.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EpochMillis;

// ---------------------------------------------------------------------------
// Encoded values
// ---------------------------------------------------------------------------

/// Incoming movement (receipt).
pub const TYPE_IN: &str = "ENTRADA";
/// Outgoing movement (delivery).
pub const TYPE_OUT: &str = "SAIDA";

/// All valid transaction type encodings.
pub const VALID_TYPES: &[&str] = &[TYPE_IN, TYPE_OUT];

/// Individually tagged asset (patrimônio).
pub const CATEGORY_ASSET: &str = "PATRIMONIO";
/// Bulk or consumable cargo.
pub const CATEGORY_CARGO: &str = "CARGA";

/// All valid category encodings.
pub const VALID_CATEGORIES: &[&str] = &[CATEGORY_ASSET, CATEGORY_CARGO];

/// Placeholder shown when a transaction has no sector name snapshot.
pub const UNKNOWN_SECTOR_NAME: &str = "Desconhecido";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Direction of an item movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "ENTRADA")]
    In,
    #[serde(rename = "SAIDA")]
    Out,
}

impl TransactionType {
    /// Return the store / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => TYPE_IN,
            Self::Out => TYPE_OUT,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::In => "Entrada",
            Self::Out => "Saída",
        }
    }
}

impl FromStr for TransactionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TYPE_IN => Ok(Self::In),
            TYPE_OUT => Ok(Self::Out),
            other => Err(CoreError::Validation(format!(
                "Unknown transaction type: '{other}'. Valid types: {}",
                VALID_TYPES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of item moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Requires a 4-digit asset tag.
    #[serde(rename = "PATRIMONIO")]
    Asset,
    /// Counted by quantity.
    #[serde(rename = "CARGA")]
    Cargo,
}

impl ItemCategory {
    /// Return the store / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => CATEGORY_ASSET,
            Self::Cargo => CATEGORY_CARGO,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Asset => "Patrimônio",
            Self::Cargo => "Carga",
        }
    }
}

impl FromStr for ItemCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CATEGORY_ASSET => Ok(Self::Asset),
            CATEGORY_CARGO => Ok(Self::Cargo),
            other => Err(CoreError::Validation(format!(
                "Unknown item category: '{other}'. Valid categories: {}",
                VALID_CATEGORIES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// An organizational sector as seen by clients. Ids are strings on this side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: String,
    pub name: String,
}

/// A stored item movement.
///
/// `sector_name` is a snapshot taken when the movement was registered (and
/// rewritten on sector rename); it survives deletion of the sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub sector_id: Option<String>,
    pub sector_name: String,
    pub date: NaiveDate,
    pub description: String,
    pub category: ItemCategory,
    pub quantity: i32,
    pub asset_id: Option<String>,
    pub timestamp: EpochMillis,
}

/// A movement that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub sector_id: Option<String>,
    pub sector_name: String,
    pub date: NaiveDate,
    pub description: String,
    pub category: ItemCategory,
    pub quantity: i32,
    pub asset_id: Option<String>,
    pub timestamp: EpochMillis,
}

impl Transaction {
    /// Attach a store-assigned id to a draft.
    pub fn from_draft(id: impl Into<String>, draft: TransactionDraft) -> Self {
        Self {
            id: id.into(),
            transaction_type: draft.transaction_type,
            sector_id: draft.sector_id,
            sector_name: draft.sector_name,
            date: draft.date,
            description: draft.description,
            category: draft.category,
            quantity: draft.quantity,
            asset_id: draft.asset_id,
            timestamp: draft.timestamp,
        }
    }

    /// Every field except the id.
    pub fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            transaction_type: self.transaction_type,
            sector_id: self.sector_id.clone(),
            sector_name: self.sector_name.clone(),
            date: self.date,
            description: self.description.clone(),
            category: self.category,
            quantity: self.quantity,
            asset_id: self.asset_id.clone(),
            timestamp: self.timestamp,
        }
    }
}
