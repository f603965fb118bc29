pub mod core;
pub mod export;
pub mod pipeline;
pub mod render;

pub use crate::core::model::{ColorAnalysis, PageClassification, SheetBucketResult};
pub use crate::core::{bucketize, classify, classify_with, format_ranges, ClassifierConfig, CoreError};
pub use pipeline::DocumentAnalysis;
