//! # PV Ledger Core Types
//!
//! Domain records shared by every other crate: installations, their
//! production reports, the validated inputs used to create them, and the
//! time arithmetic behind report timestamps and summation windows.

pub mod error;
pub mod structs;
pub mod time;
pub mod validation;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use structs::{Installation, NewInstallation, NewProductionReport, ProductionReport};
pub use time::{deserialize_timestamp, parse_timestamp, truncate_to_minute, ReportWindow};
pub use validation::{InstallationDraft, ProductionReportDraft, MAX_ADDRESS_LEN, MAX_OWNER_NAME_LEN};
