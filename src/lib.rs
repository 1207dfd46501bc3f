//! custseg: Customer Segmentation Library
//!
//! Loads a trained purchase-count regressor together with its fitted scaler and
//! training column layout, aligns customer records to that layout, predicts the
//! number of web purchases and labels each customer by income and buying level.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
