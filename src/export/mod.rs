pub mod csv_export;
pub mod json_export;
pub mod text_export;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::pipeline::DocumentAnalysis;

pub use csv_export::CsvExporter;
pub use json_export::JsonExporter;
pub use text_export::TextExporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}

pub trait Exporter {
    fn export(&self, analysis: &DocumentAnalysis) -> Result<()>;
}
