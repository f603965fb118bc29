pub mod error;
pub mod model;
pub mod overrides;
pub mod pixel_classifier;
pub mod range_format;
pub mod sheet_bucketizer;

pub use error::CoreError;
pub use model::{ColorAnalysis, PageClassification, PrintPlanSummary, SheetBucketResult, SheetKind};
pub use overrides::{set_override, toggle_page};
pub use pixel_classifier::{classify, classify_with, ClassifierConfig, PixelBuffer};
pub use range_format::{format_ranges, parse_ranges};
pub use sheet_bucketizer::{bucketize, sheet_kind};
