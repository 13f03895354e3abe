pub mod chart;
pub mod config;
pub mod error;
pub mod ingest;
pub mod record;
