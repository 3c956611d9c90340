use crate::{DbError, InstallationStore};
use async_trait::async_trait;
use core_types::{Installation, NewInstallation, NewProductionReport, ReportWindow};
use sqlx::postgres::PgPool;

const INSTALLATION_COLUMNS: &str =
    "id, longitude, latitude, address, owner_name, is_active, comments";

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstallationStore for DbRepository {
    async fn create_installation(&self, installation: &NewInstallation) -> Result<i32, DbError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO installations (longitude, latitude, address, owner_name, is_active, comments)
            VALUES ($1, $2, $3, $4, TRUE, $5)
            RETURNING id
            "#,
        )
        .bind(installation.longitude)
        .bind(installation.latitude)
        .bind(&installation.address)
        .bind(&installation.owner_name)
        .bind(installation.comments.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn get_installation(&self, id: i32) -> Result<Installation, DbError> {
        let query = format!("SELECT {} FROM installations WHERE id = $1", INSTALLATION_COLUMNS);
        sqlx::query_as::<_, Installation>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound(id))
    }

    /// A single `UPDATE ... RETURNING`, so concurrent deactivations cannot
    /// interleave between the lookup and the write.
    async fn deactivate_installation(&self, id: i32) -> Result<Installation, DbError> {
        let query = format!(
            "UPDATE installations SET is_active = FALSE WHERE id = $1 RETURNING {}",
            INSTALLATION_COLUMNS
        );
        sqlx::query_as::<_, Installation>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound(id))
    }

    /// Looks up the installation and inserts the report within one transaction.
    /// The row is locked `FOR SHARE`, so a concurrent deactivation waits until
    /// the report is committed.
    async fn add_production_report(
        &self,
        installation_id: i32,
        report: &NewProductionReport,
    ) -> Result<Installation, DbError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "SELECT {} FROM installations WHERE id = $1 FOR SHARE",
            INSTALLATION_COLUMNS
        );
        let installation = sqlx::query_as::<_, Installation>(&query)
            .bind(installation_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound(installation_id))?;

        sqlx::query(
            r#"
            INSERT INTO production_reports (
                installation_id, timestamp, produced_wattage,
                household_wattage, battery_wattage, grid_wattage
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(installation_id)
        .bind(report.timestamp)
        .bind(report.produced_wattage)
        .bind(report.household_wattage)
        .bind(report.battery_wattage)
        .bind(report.grid_wattage)
        .execute(&mut *tx) // Note: must use the transaction object `tx` here
        .await?;

        tx.commit().await?;
        Ok(installation)
    }

    /// The outer join keeps the installation row even when no report matches,
    /// which separates "unknown installation" (no row) from "empty window" (0.0).
    async fn sum_produced_wattage(
        &self,
        installation_id: i32,
        window: &ReportWindow,
    ) -> Result<f64, DbError> {
        let sum = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT COALESCE(SUM(pr.produced_wattage), 0::DOUBLE PRECISION)
            FROM installations AS i
            LEFT JOIN production_reports AS pr
                ON pr.installation_id = i.id
                AND pr.timestamp >= $2
                AND pr.timestamp <= $3
            WHERE i.id = $1
            GROUP BY i.id
            "#,
        )
        .bind(installation_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound(installation_id))?;

        Ok(sum)
    }
}
