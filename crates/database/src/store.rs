use crate::DbError;
use async_trait::async_trait;
use core_types::{Installation, NewInstallation, NewProductionReport, ReportWindow};

/// The storage contract behind the request handlers.
///
/// Every method is one logical unit of work. Methods addressing an
/// installation by id return `DbError::NotFound` when no such row exists.
#[async_trait]
pub trait InstallationStore: Send + Sync {
    /// Persists a new, active installation and returns its assigned id.
    async fn create_installation(&self, installation: &NewInstallation) -> Result<i32, DbError>;

    async fn get_installation(&self, id: i32) -> Result<Installation, DbError>;

    /// Clears the active flag. Already inactive installations are returned unchanged.
    async fn deactivate_installation(&self, id: i32) -> Result<Installation, DbError>;

    /// Attaches a report to an installation (active or not) and returns the installation.
    async fn add_production_report(
        &self,
        installation_id: i32,
        report: &NewProductionReport,
    ) -> Result<Installation, DbError>;

    /// Sums `produced_wattage` over the installation's reports inside `window`.
    /// Yields `0.0` when nothing matches.
    async fn sum_produced_wattage(
        &self,
        installation_id: i32,
        window: &ReportWindow,
    ) -> Result<f64, DbError>;
}
