//! Repository for the `movimentacoes` table.

use sqlx::PgPool;
use stockroom_core::types::DbId;

use crate::models::transaction::{Transaction, TransactionInput};

/// Column list shared across queries, aliased to the model field names.
const COLUMNS: &str = "id_movimentacao AS id, \
     tipo AS transaction_type, \
     id_setor AS sector_id, \
     nome_setor AS sector_name, \
     data_movimentacao AS \"date\", \
     descricao AS description, \
     categoria AS category, \
     quantidade AS quantity, \
     id_patrimonio AS asset_id, \
     timestamp_ms AS \"timestamp\"";

/// Provides CRUD operations for movements.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Insert a movement, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &TransactionInput,
    ) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO movimentacoes
                (tipo, id_setor, nome_setor, data_movimentacao, descricao,
                 categoria, quantidade, id_patrimonio, timestamp_ms)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(&input.transaction_type)
            .bind(input.sector_id)
            .bind(&input.sector_name)
            .bind(input.date)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.quantity)
            .bind(&input.asset_id)
            .bind(input.timestamp)
            .fetch_one(pool)
            .await
    }

    /// List all movements, newest day first; same-day entries by most recent
    /// registration first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movimentacoes
             ORDER BY data_movimentacao DESC, timestamp_ms DESC"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every column of a movement. Returns `true` if a row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &TransactionInput,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE movimentacoes SET
                tipo = $2,
                id_setor = $3,
                nome_setor = $4,
                data_movimentacao = $5,
                descricao = $6,
                categoria = $7,
                quantidade = $8,
                id_patrimonio = $9,
                timestamp_ms = $10
             WHERE id_movimentacao = $1",
        )
        .bind(id)
        .bind(&input.transaction_type)
        .bind(input.sector_id)
        .bind(&input.sector_name)
        .bind(input.date)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.quantity)
        .bind(&input.asset_id)
        .bind(input.timestamp)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a movement. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movimentacoes WHERE id_movimentacao = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
