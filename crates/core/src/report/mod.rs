pub mod reporter;
pub mod types;

pub use reporter::{diagnostics_for, normalize};
pub use types::AnalysisReport;
