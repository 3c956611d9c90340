//! # PV Ledger Database Crate
//!
//! This crate is the service's only link to PostgreSQL. Installations and
//! their production reports live in two tables; every read-then-write a
//! handler needs is expressed as a single statement or a single transaction.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: Applies the embedded schema migrations.
//! - `InstallationStore`: The storage contract the web layer is written against.
//! - `DbRepository`: The PostgreSQL implementation of `InstallationStore`.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
pub use store::InstallationStore;
