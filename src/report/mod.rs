//! Report module - rendering and exporting prediction results

pub mod prediction_table;
pub mod summary;
pub mod summary_export;

pub use prediction_table::*;
pub use summary::*;
pub use summary_export::*;
