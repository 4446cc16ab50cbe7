//! Registration form: records one incoming or outgoing movement.

use chrono::NaiveDate;
use stockroom_core::inventory::{
    ItemCategory, Sector, Transaction, TransactionDraft, TransactionType, UNKNOWN_SECTOR_NAME,
};
use stockroom_core::types::{now_millis, EpochMillis};
use stockroom_core::validation::{sanitize_asset_tag_input, validate_draft, ValidationError, MIN_QUANTITY};

use crate::gateway::Gateway;
use crate::views::ViewError;

pub struct RegistrationForm<G> {
    gateway: G,
    sectors: Vec<Sector>,
    load_error: Option<String>,

    pub transaction_type: TransactionType,
    pub sector_id: Option<String>,
    pub date: NaiveDate,
    pub description: String,
    pub category: ItemCategory,
    pub quantity: i32,
    asset_tag: String,
}

impl<G: Gateway> RegistrationForm<G> {
    /// Empty form: incoming cargo, quantity 1, dated `today`.
    pub fn new(gateway: G, today: NaiveDate) -> Self {
        Self {
            gateway,
            sectors: Vec::new(),
            load_error: None,
            transaction_type: TransactionType::In,
            sector_id: None,
            date: today,
            description: String::new(),
            category: ItemCategory::Cargo,
            quantity: MIN_QUANTITY,
            asset_tag: String::new(),
        }
    }

    /// Fetch the sector choices. On failure the list is left empty and the
    /// error is kept for display. Selects the first sector if none is chosen.
    pub async fn load(&mut self) {
        match self.gateway.list_sectors().await {
            Ok(sectors) => {
                self.sectors = sectors;
                self.load_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load sectors");
                self.sectors.clear();
                self.load_error = Some(e.to_string());
            }
        }

        if self.sector_id.is_none() {
            self.sector_id = self.sectors.first().map(|s| s.id.clone());
        }
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Accept raw keyboard input for the asset tag field.
    pub fn set_asset_tag(&mut self, raw: &str) {
        self.asset_tag = sanitize_asset_tag_input(raw);
    }

    pub fn asset_tag(&self) -> &str {
        &self.asset_tag
    }

    /// The movement the form currently describes.
    pub fn draft(&self, timestamp: EpochMillis) -> TransactionDraft {
        let sector_name = self
            .sector_id
            .as_deref()
            .and_then(|id| self.sectors.iter().find(|s| s.id == id))
            .map_or_else(|| UNKNOWN_SECTOR_NAME.to_string(), |s| s.name.clone());

        TransactionDraft {
            transaction_type: self.transaction_type,
            sector_id: self.sector_id.clone(),
            sector_name,
            date: self.date,
            description: self.description.clone(),
            category: self.category,
            quantity: self.quantity,
            asset_id: (self.category == ItemCategory::Asset).then(|| self.asset_tag.clone()),
            timestamp,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_draft(&self.draft(0))
    }

    /// Validate and store the movement.
    ///
    /// On success the description, quantity and asset tag are cleared; type,
    /// sector, date and category stay for the next entry. On failure the form
    /// is left untouched.
    pub async fn submit(&mut self) -> Result<Transaction, ViewError> {
        let draft = self.draft(now_millis());
        validate_draft(&draft)?;

        let saved = self.gateway.add_transaction(&draft).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to register movement");
        })?;
        tracing::info!(transaction_id = %saved.id, kind = %saved.transaction_type, "Movement registered");

        self.description.clear();
        self.quantity = MIN_QUANTITY;
        self.asset_tag.clear();
        Ok(saved)
    }
}
