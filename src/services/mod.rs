//! Service layer for persistence.
//!
//! Services sit between the pure chart model and the outer surfaces
//! (terminal UI, web API) and own all file system access.

pub mod charts;

// Re-export commonly used types
pub use charts::{ChartService, ChartSummary};
