//! Movement history: a filterable table with inline edit and delete.
//!
//! Edits work on a copy of one row. Saving writes the copy through the
//! gateway and patches the local list in place; nothing is reloaded.

use stockroom_core::filter::HistoryFilter;
use stockroom_core::inventory::{Sector, Transaction};
use stockroom_core::validation::{sanitize_asset_tag_input, validate_draft};

use crate::gateway::Gateway;
use crate::views::ViewError;

pub struct HistoryView<G> {
    gateway: G,
    transactions: Vec<Transaction>,
    sectors: Vec<Sector>,
    load_error: Option<String>,
    editing: Option<Transaction>,

    pub filter: HistoryFilter,
}

impl<G: Gateway> HistoryView<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            transactions: Vec::new(),
            sectors: Vec::new(),
            load_error: None,
            editing: None,
            filter: HistoryFilter::default(),
        }
    }

    /// Fetch movements and sectors concurrently. Either list degrades to
    /// empty on failure; the last failure is kept for display.
    pub async fn load(&mut self) {
        let (transactions, sectors) =
            tokio::join!(self.gateway.list_transactions(), self.gateway.list_sectors());
        self.load_error = None;

        match transactions {
            Ok(transactions) => self.transactions = transactions,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load movement history");
                self.transactions.clear();
                self.load_error = Some(e.to_string());
            }
        }
        match sectors {
            Ok(sectors) => self.sectors = sectors,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load sectors");
                self.sectors.clear();
                self.load_error = Some(e.to_string());
            }
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Every loaded movement, in server order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Movements matching the current filter, in server order.
    pub fn visible(&self) -> Vec<&Transaction> {
        self.filter.apply(&self.transactions)
    }

    /// Number of rows currently shown.
    pub fn total(&self) -> usize {
        self.visible().len()
    }

    // ---- inline edit ----

    /// Start editing a copy of the movement with `id`. Replaces any edit in
    /// progress.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), ViewError> {
        let tx = self
            .transactions
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ViewError::UnknownRecord(id.to_string()))?;
        self.editing = Some(tx.clone());
        Ok(())
    }

    pub fn editing(&self) -> Option<&Transaction> {
        self.editing.as_ref()
    }

    /// Field access on the copy being edited.
    pub fn edit_mut(&mut self) -> Option<&mut Transaction> {
        self.editing.as_mut()
    }

    /// Point the edited copy at another sector. A known sector also carries
    /// its name over; an unknown id changes only the id.
    pub fn choose_sector(&mut self, sector_id: &str) {
        let Some(edit) = self.editing.as_mut() else {
            return;
        };
        edit.sector_id = Some(sector_id.to_string());
        if let Some(sector) = self.sectors.iter().find(|s| s.id == sector_id) {
            edit.sector_name = sector.name.clone();
        }
    }

    pub fn set_edit_asset_tag(&mut self, raw: &str) {
        if let Some(edit) = self.editing.as_mut() {
            edit.asset_id = Some(sanitize_asset_tag_input(raw));
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Validate and store the edited copy, then patch it into the local list.
    ///
    /// Returns `None` when no edit is in progress. On failure the edit stays
    /// open.
    pub async fn save_edit(&mut self) -> Result<Option<Transaction>, ViewError> {
        let Some(edit) = self.editing.clone() else {
            return Ok(None);
        };
        validate_draft(&edit.to_draft())?;

        self.gateway.update_transaction(&edit).await.inspect_err(|e| {
            tracing::warn!(transaction_id = %edit.id, error = %e, "Failed to update movement");
        })?;

        for tx in self.transactions.iter_mut().filter(|t| t.id == edit.id) {
            *tx = edit.clone();
        }
        self.editing = None;
        tracing::info!(transaction_id = %edit.id, "Movement updated");
        Ok(Some(edit))
    }

    /// Delete a movement and drop it from the local list. An edit of the same
    /// row is cancelled.
    pub async fn delete(&mut self, id: &str) -> Result<(), ViewError> {
        self.gateway.delete_transaction(id).await.inspect_err(|e| {
            tracing::warn!(transaction_id = %id, error = %e, "Failed to delete movement");
        })?;

        self.transactions.retain(|t| t.id != id);
        if self.editing.as_ref().is_some_and(|t| t.id == id) {
            self.editing = None;
        }
        tracing::info!(transaction_id = %id, "Movement deleted");
        Ok(())
    }
}
