//! Repository for the `setores` table.

use sqlx::PgPool;
use stockroom_core::types::DbId;

use crate::models::sector::{CreateSector, Sector, SectorDeletion, SectorRename, UpdateSector};

/// Column list shared across queries, aliased to the model field names.
const COLUMNS: &str = "id_setor AS id, nome AS name";

/// Provides CRUD operations for sectors.
pub struct SectorRepo;

impl SectorRepo {
    /// Insert a new sector, returning it with its assigned id.
    ///
    /// Names are not checked for duplicates.
    pub async fn create(pool: &PgPool, input: &CreateSector) -> Result<Sector, sqlx::Error> {
        let query = format!("INSERT INTO setores (nome) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Sector>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List all sectors ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Sector>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM setores ORDER BY nome ASC");
        sqlx::query_as::<_, Sector>(&query).fetch_all(pool).await
    }

    /// Rename a sector and rewrite the name snapshot on its movements.
    ///
    /// Both statements run in one transaction, so a failure leaves neither
    /// applied.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSector,
    ) -> Result<SectorRename, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let renamed = sqlx::query("UPDATE setores SET nome = $1 WHERE id_setor = $2")
            .bind(&input.name)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        let transactions_updated =
            sqlx::query("UPDATE movimentacoes SET nome_setor = $1 WHERE id_setor = $2")
                .bind(&input.name)
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        tx.commit().await?;

        Ok(SectorRename {
            renamed,
            transactions_updated,
        })
    }

    /// Delete a sector row. Movements referencing it keep their `id_setor`
    /// and `nome_setor`; the returned count is informational.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<SectorDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (linked_transactions,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM movimentacoes WHERE id_setor = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        let deleted = sqlx::query("DELETE FROM setores WHERE id_setor = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        tx.commit().await?;

        Ok(SectorDeletion {
            deleted,
            linked_transactions,
        })
    }
}
