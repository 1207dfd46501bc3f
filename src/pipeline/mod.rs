//! Pipeline module - alignment, scaling, prediction and labeling

pub mod align;
pub mod artifacts;
pub mod batch;
pub mod context;
pub mod labeler;
pub mod loader;
pub mod model;
pub mod record;
pub mod scaler;

pub use align::*;
pub use artifacts::*;
pub use batch::*;
pub use context::*;
pub use labeler::*;
pub use loader::*;
pub use model::*;
pub use record::*;
pub use scaler::*;
