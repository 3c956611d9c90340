//! Request payloads and the explicit validation step that turns them into
//! domain inputs. Structural problems (missing fields, wrong types) are caught
//! by deserialization; the constraints below are checked afterwards.

use crate::error::CoreError;
use crate::structs::{NewInstallation, NewProductionReport};
use crate::time::truncate_to_minute;
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const MAX_ADDRESS_LEN: usize = 1024;
pub const MAX_OWNER_NAME_LEN: usize = 512;

/// Body of a create-installation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationDraft {
    pub longitude: f64,
    pub latitude: f64,
    pub address: String,
    pub owner_name: String,
    #[serde(default)]
    pub comments: Option<String>,
}

impl InstallationDraft {
    pub fn validate(self) -> Result<NewInstallation, CoreError> {
        check_coordinate("longitude", self.longitude)?;
        check_coordinate("latitude", self.latitude)?;
        check_text("address", &self.address, MAX_ADDRESS_LEN)?;
        check_text("ownerName", &self.owner_name, MAX_OWNER_NAME_LEN)?;

        Ok(NewInstallation {
            longitude: self.longitude,
            latitude: self.latitude,
            address: self.address,
            owner_name: self.owner_name,
            comments: self.comments,
        })
    }
}

/// Body of a submit-report request. Wattages are unconstrained: negative,
/// zero and very large readings are all accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionReportDraft {
    pub produced_wattage: f64,
    pub household_wattage: f64,
    pub battery_wattage: f64,
    pub grid_wattage: f64,
}

impl ProductionReportDraft {
    /// Stamps the reading with `received_at`, floored to its minute.
    pub fn into_report(self, received_at: DateTime<Utc>) -> NewProductionReport {
        NewProductionReport {
            timestamp: truncate_to_minute(received_at),
            produced_wattage: self.produced_wattage,
            household_wattage: self.household_wattage,
            battery_wattage: self.battery_wattage,
            grid_wattage: self.grid_wattage,
        }
    }
}

fn check_coordinate(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::invalid(field, "must be a finite number"));
    }
    Ok(())
}

fn check_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid(field, "is required"));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(CoreError::invalid(
            field,
            format!("must be at most {} characters, got {}", max_len, len),
        ));
    }
    Ok(())
}
