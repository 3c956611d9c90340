use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A monitored photovoltaic site, as stored in the `installations` table.
///
/// Production reports belong to an installation but are never part of its
/// serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    pub id: i32,
    pub longitude: f64,
    pub latitude: f64,
    pub address: String,
    pub owner_name: String,
    pub is_active: bool,
    pub comments: Option<String>,
}

/// One timestamped reading for an installation, as stored in the
/// `production_reports` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductionReport {
    pub id: i32,
    pub installation_id: i32,
    pub timestamp: DateTime<Utc>,
    pub produced_wattage: f64,
    pub household_wattage: f64,
    pub battery_wattage: f64,
    pub grid_wattage: f64,
}

/// A validated installation that has not been persisted yet.
/// New installations always start out active.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInstallation {
    pub longitude: f64,
    pub latitude: f64,
    pub address: String,
    pub owner_name: String,
    pub comments: Option<String>,
}

/// A production report ready to be attached to an installation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductionReport {
    /// Already truncated to the start of its minute.
    pub timestamp: DateTime<Utc>,
    pub produced_wattage: f64,
    pub household_wattage: f64,
    pub battery_wattage: f64,
    pub grid_wattage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installation() -> Installation {
        Installation {
            id: 7,
            longitude: 14.28,
            latitude: 48.3,
            address: "Hauptplatz 1, Linz".to_string(),
            owner_name: "R. Huber".to_string(),
            is_active: true,
            comments: None,
        }
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(installation()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["ownerName"], "R. Huber");
        assert_eq!(json["isActive"], true);
        assert!(json["comments"].is_null());
        assert!(json.get("productionReports").is_none());
    }
}
