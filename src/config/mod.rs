//! Configuration module for the earnings-edge application.

mod analysis;
mod types;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisDefaults};
pub use types::{MovePct, VolFrac};
