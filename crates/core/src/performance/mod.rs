//! Read-side performance reporting.

pub mod performance_model;
pub mod performance_service;


pub use performance_model::HoldingPerformance;
pub use performance_service::{aggregate_performance, PerformanceService};
