//! Core library for the personnel readiness service: roster ingestion,
//! per-record assessment, population analytics, and staffing plans.

pub mod analytics;
pub mod assessment;
pub mod config;
pub mod error;
pub mod planning;
pub mod roster;
pub mod store;
pub mod telemetry;
