//! An in-memory `InstallationStore` so the router can be exercised without PostgreSQL.

use async_trait::async_trait;
use axum_test::TestServer;
use core_types::{Installation, NewInstallation, NewProductionReport, ProductionReport, ReportWindow};
use database::{DbError, InstallationStore};
use std::sync::{Arc, Mutex};
use web_server::{create_app, AppState};

#[derive(Default)]
struct Tables {
    installations: Vec<Installation>,
    reports: Vec<ProductionReport>,
}

impl Tables {
    fn push_report(&mut self, installation_id: i32, report: &NewProductionReport) {
        let id = self.reports.len() as i32 + 1;
        self.reports.push(ProductionReport {
            id,
            installation_id,
            timestamp: report.timestamp,
            produced_wattage: report.produced_wattage,
            household_wattage: report.household_wattage,
            battery_wattage: report.battery_wattage,
            grid_wattage: report.grid_wattage,
        });
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Snapshot of every stored report, for assertions.
    pub fn reports(&self) -> Vec<ProductionReport> {
        self.tables.lock().unwrap().reports.clone()
    }
}

#[async_trait]
impl InstallationStore for MemoryStore {
    async fn create_installation(&self, new: &NewInstallation) -> Result<i32, DbError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.installations.len() as i32 + 1;
        tables.installations.push(Installation {
            id,
            longitude: new.longitude,
            latitude: new.latitude,
            address: new.address.clone(),
            owner_name: new.owner_name.clone(),
            is_active: true,
            comments: new.comments.clone(),
        });
        Ok(id)
    }

    async fn get_installation(&self, id: i32) -> Result<Installation, DbError> {
        let tables = self.tables.lock().unwrap();
        tables
            .installations
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(DbError::NotFound(id))
    }

    async fn deactivate_installation(&self, id: i32) -> Result<Installation, DbError> {
        let mut tables = self.tables.lock().unwrap();
        let installation = tables
            .installations
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DbError::NotFound(id))?;
        installation.is_active = false;
        Ok(installation.clone())
    }

    async fn add_production_report(
        &self,
        installation_id: i32,
        report: &NewProductionReport,
    ) -> Result<Installation, DbError> {
        let mut tables = self.tables.lock().unwrap();
        let installation = tables
            .installations
            .iter()
            .find(|i| i.id == installation_id)
            .cloned()
            .ok_or(DbError::NotFound(installation_id))?;
        tables.push_report(installation_id, report);
        Ok(installation)
    }

    async fn sum_produced_wattage(
        &self,
        installation_id: i32,
        window: &ReportWindow,
    ) -> Result<f64, DbError> {
        let tables = self.tables.lock().unwrap();
        if !tables.installations.iter().any(|i| i.id == installation_id) {
            return Err(DbError::NotFound(installation_id));
        }
        Ok(tables
            .reports
            .iter()
            .filter(|r| r.installation_id == installation_id && window.contains(r.timestamp))
            .fold(0.0, |acc, r| acc + r.produced_wattage))
    }
}

/// Starts an in-process server over a fresh store; the store handle is
/// returned so tests can inspect or seed it directly.
pub fn setup_test_server() -> anyhow::Result<(TestServer, MemoryStore)> {
    let store = MemoryStore::default();
    let server = TestServer::new(create_app(AppState::new(store.clone())))?;
    Ok((server, store))
}

/// Seeds a report with an explicit timestamp, bypassing the clock.
pub fn seed_report(store: &MemoryStore, installation_id: i32, report: NewProductionReport) {
    store.tables.lock().unwrap().push_report(installation_id, &report);
}
