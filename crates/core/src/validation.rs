//! Form validation for movements and sectors.
//!
//! These rules are enforced by the client views before anything is sent; the
//! store accepts whatever it is given.

use std::sync::LazyLock;

use regex::Regex;

use crate::inventory::{ItemCategory, TransactionDraft};

/// Asset tags are exactly this many digits.
pub const ASSET_TAG_LEN: usize = 4;

/// Smallest quantity a movement may carry.
pub const MIN_QUANTITY: i32 = 1;

static ASSET_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));

/// A rejected form submission. The message is meant for the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Selecione um setor.")]
    MissingSector,

    #[error("Insira uma descrição para o objeto.")]
    MissingDescription,

    #[error("Para itens de patrimônio, informe a placa com 4 números.")]
    InvalidAssetTag,

    #[error("A quantidade deve ser pelo menos 1.")]
    QuantityBelowMinimum,

    #[error("Informe o nome do setor.")]
    BlankSectorName,
}

/// Whether `tag` is exactly four ASCII digits.
pub fn is_valid_asset_tag(tag: &str) -> bool {
    ASSET_TAG_RE.is_match(tag)
}

/// Reduce free-form input to what the asset tag field accepts: digits only,
/// at most [`ASSET_TAG_LEN`] of them.
pub fn sanitize_asset_tag_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(ASSET_TAG_LEN)
        .collect()
}

/// Check a movement before submission.
///
/// Rules run in a fixed order and the first failure wins: sector, description,
/// asset tag (assets only), quantity.
pub fn validate_draft(draft: &TransactionDraft) -> Result<(), ValidationError> {
    if draft.sector_id.as_deref().unwrap_or_default().is_empty() {
        return Err(ValidationError::MissingSector);
    }
    if draft.description.trim().is_empty() {
        return Err(ValidationError::MissingDescription);
    }
    if draft.category == ItemCategory::Asset
        && !draft.asset_id.as_deref().is_some_and(is_valid_asset_tag)
    {
        return Err(ValidationError::InvalidAssetTag);
    }
    if draft.quantity < MIN_QUANTITY {
        return Err(ValidationError::QuantityBelowMinimum);
    }
    Ok(())
}

/// Trim a sector name, rejecting one that is blank.
pub fn normalize_sector_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankSectorName);
    }
    Ok(name.to_string())
}
