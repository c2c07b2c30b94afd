//! Command implementations for sweepctl CLI

pub mod extract;
pub mod plan;
pub mod run;

// Re-export main dispatcher functions for flat access from main.rs
pub use extract::run_extract;
pub use plan::run_plan;
pub use run::run_sweep;
