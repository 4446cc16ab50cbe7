//! Sector management. Every successful change reloads the list from the
//! gateway.

use stockroom_core::inventory::Sector;
use stockroom_core::validation::normalize_sector_name;

use crate::gateway::Gateway;
use crate::views::ViewError;

pub struct SectorsView<G> {
    gateway: G,
    sectors: Vec<Sector>,
    load_error: Option<String>,
}

impl<G: Gateway> SectorsView<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            sectors: Vec::new(),
            load_error: None,
        }
    }

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
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn total(&self) -> usize {
        self.sectors.len()
    }

    /// Create a sector from user input. A blank name is rejected without a
    /// call.
    pub async fn add(&mut self, raw_name: &str) -> Result<Sector, ViewError> {
        let name = normalize_sector_name(raw_name)?;
        let created = self.gateway.create_sector(&name).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to create sector");
        })?;
        tracing::info!(sector_id = %created.id, name = %created.name, "Sector created");

        self.load().await;
        Ok(created)
    }

    /// Rename a sector. Returns how many movements picked up the new name.
    pub async fn rename(&mut self, id: &str, raw_name: &str) -> Result<u64, ViewError> {
        let name = normalize_sector_name(raw_name)?;
        let sector = Sector {
            id: id.to_string(),
            name,
        };
        let rewritten = self.gateway.rename_sector(&sector).await.inspect_err(|e| {
            tracing::warn!(sector_id = %id, error = %e, "Failed to rename sector");
        })?;
        tracing::info!(sector_id = %id, transactions_updated = rewritten, "Sector renamed");

        self.load().await;
        Ok(rewritten)
    }

    /// Delete a sector. Its movements are kept; returns how many still point
    /// at it.
    pub async fn delete(&mut self, id: &str) -> Result<u64, ViewError> {
        let linked = self.gateway.delete_sector(id).await.inspect_err(|e| {
            tracing::warn!(sector_id = %id, error = %e, "Failed to delete sector");
        })?;
        tracing::info!(sector_id = %id, linked_transactions = linked, "Sector deleted");

        self.load().await;
        Ok(linked)
    }
}
