//! Client data gateway for the stockroom REST API.
//!
//! One call per endpoint. Reads are normalized on the way in: ids become
//! strings, missing sector/asset ids become `None`, a missing sector name
//! becomes [`UNKNOWN_SECTOR_NAME`], and the encoded type/category strings are
//! parsed into their enums.
//!
//! The store accepts any type/category text, so a listing may contain rows
//! the client cannot represent. Those rows are skipped with a warning; the
//! rest of the listing is still returned.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use stockroom_core::inventory::{
    ItemCategory, Sector, Transaction, TransactionDraft, TransactionType, UNKNOWN_SECTOR_NAME,
};
use stockroom_core::types::{DbId, EpochMillis};
use stockroom_core::wire;

use crate::error::ClientError;

/// Where the API listens unless told otherwise.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Operations the views need from the backend.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// All sectors, ordered by name.
    async fn list_sectors(&self) -> Result<Vec<Sector>, ClientError>;

    /// Create a sector; returns it with the store-assigned id.
    async fn create_sector(&self, name: &str) -> Result<Sector, ClientError>;

    /// Rename a sector. Returns how many movements had their name snapshot
    /// rewritten.
    async fn rename_sector(&self, sector: &Sector) -> Result<u64, ClientError>;

    /// Delete a sector. Returns how many movements still reference it.
    async fn delete_sector(&self, id: &str) -> Result<u64, ClientError>;

    /// All movements, newest date first. Rows with an unknown type or
    /// category encoding are left out.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, ClientError>;

    /// Store a new movement; returns it with the store-assigned id.
    async fn add_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ClientError>;

    /// Overwrite every field of a stored movement.
    async fn update_transaction(&self, tx: &Transaction) -> Result<(), ClientError>;

    async fn delete_transaction(&self, id: &str) -> Result<(), ClientError>;
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SectorRow {
    #[serde(deserialize_with = "wire::id_string")]
    id: String,
    name: String,
}

impl From<SectorRow> for Sector {
    fn from(row: SectorRow) -> Self {
        Sector {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRow {
    #[serde(deserialize_with = "wire::id_string")]
    id: String,
    #[serde(rename = "type")]
    transaction_type: String,
    #[serde(default, deserialize_with = "wire::optional_id_string")]
    sector_id: Option<String>,
    #[serde(default)]
    sector_name: Option<String>,
    date: NaiveDate,
    description: String,
    category: String,
    quantity: i32,
    #[serde(default, deserialize_with = "wire::optional_text")]
    asset_id: Option<String>,
    timestamp: EpochMillis,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = ClientError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let transaction_type = row
            .transaction_type
            .parse::<TransactionType>()
            .map_err(|e| ClientError::Decode(format!("movement {}: {e}", row.id)))?;
        let category = row
            .category
            .parse::<ItemCategory>()
            .map_err(|e| ClientError::Decode(format!("movement {}: {e}", row.id)))?;
        let sector_name = row
            .sector_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_SECTOR_NAME.to_string());

        Ok(Transaction {
            id: row.id,
            transaction_type,
            sector_id: row.sector_id,
            sector_name,
            date: row.date,
            description: row.description,
            category,
            quantity: row.quantity,
            asset_id: row.asset_id,
            timestamp: row.timestamp,
        })
    }
}

/// Convert listed rows, dropping the ones whose encodings are unknown.
fn decode_rows(rows: Vec<TransactionRow>) -> Vec<Transaction> {
    rows.into_iter()
        .filter_map(|row| {
            let transaction_id = row.id.clone();
            Transaction::try_from(row)
                .inspect_err(|e| {
                    tracing::warn!(%transaction_id, error = %e, "Skipping unreadable movement");
                })
                .ok()
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct RenameAck {
    movimentacoes_atualizadas: u64,
}

#[derive(Debug, Deserialize)]
struct DeleteSectorAck {
    movimentacoes_vinculadas: u64,
}

#[derive(Debug, Deserialize)]
struct CreatedAck {
    id: DbId,
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// [`Gateway`] over HTTP, using [`reqwest`].
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    api_url: String,
}

impl HttpGateway {
    /// * `api_url` - Base URL, e.g. `http://localhost:3001`. A trailing slash
    ///   is dropped.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let mut api_url = api_url.into();
        while api_url.ends_with('/') {
            api_url.pop();
        }
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// `{api_url}{collection}/{id}` with `id` percent-encoded as a single
    /// path segment. Empty and dot-segment ids are refused.
    fn resource_url(&self, collection: &str, id: &str) -> Result<reqwest::Url, ClientError> {
        if matches!(id, "" | "." | "..") {
            return Err(ClientError::InvalidUrl(format!("resource id {id:?}")));
        }
        let mut url = reqwest::Url::parse(&self.url(collection))
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.api_url)))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    // ---- private helpers ----

    /// Return the response unchanged on 2xx, or a [`ClientError::Status`]
    /// carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Read a successful response body as JSON. Body read failures are
    /// transport errors; malformed JSON is a decode error.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_sectors(&self) -> Result<Vec<Sector>, ClientError> {
        let response = self.client.get(self.url("/setores")).send().await?;
        let rows: Vec<SectorRow> = Self::parse_response(response).await?;
        Ok(rows.into_iter().map(Sector::from).collect())
    }

    async fn create_sector(&self, name: &str) -> Result<Sector, ClientError> {
        let response = self
            .client
            .post(self.url("/setores"))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        let row: SectorRow = Self::parse_response(response).await?;
        Ok(row.into())
    }

    async fn rename_sector(&self, sector: &Sector) -> Result<u64, ClientError> {
        let response = self
            .client
            .put(self.resource_url("/setores", &sector.id)?)
            .json(&serde_json::json!({ "name": sector.name }))
            .send()
            .await?;
        let ack: RenameAck = Self::parse_response(response).await?;
        Ok(ack.movimentacoes_atualizadas)
    }

    async fn delete_sector(&self, id: &str) -> Result<u64, ClientError> {
        let response = self
            .client
            .delete(self.resource_url("/setores", id)?)
            .send()
            .await?;
        let ack: DeleteSectorAck = Self::parse_response(response).await?;
        Ok(ack.movimentacoes_vinculadas)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        let response = self.client.get(self.url("/movimentacoes")).send().await?;
        let rows: Vec<TransactionRow> = Self::parse_response(response).await?;
        Ok(decode_rows(rows))
    }

    async fn add_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ClientError> {
        let response = self
            .client
            .post(self.url("/movimentacoes"))
            .json(draft)
            .send()
            .await?;
        let ack: CreatedAck = Self::parse_response(response).await?;
        Ok(Transaction::from_draft(ack.id.to_string(), draft.clone()))
    }

    async fn update_transaction(&self, tx: &Transaction) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.resource_url("/movimentacoes", &tx.id)?)
            .json(tx)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.resource_url("/movimentacoes", id)?)
            .send()
            .await?;
        Self::check_status(response).await
    }
}
