pub mod adapters;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod infra;
pub mod logging;
pub mod pipeline;
pub mod snapshots;
pub mod types;
