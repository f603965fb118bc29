use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::core::{PageClassification, PrintPlanSummary, SheetBucketResult};
use crate::export::Exporter;
use crate::pipeline::DocumentAnalysis;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    total_pages: u32,
    pages: &'a [PageClassification],
    buckets: SheetBucketResult,
    summary: PrintPlanSummary,
}

impl Exporter for JsonExporter {
    fn export(&self, analysis: &DocumentAnalysis) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        let buckets = analysis.buckets()?;
        let report = JsonReport {
            total_pages: analysis.total_pages,
            pages: &analysis.pages,
            summary: buckets.summary(),
            buckets,
        };
        let path = self.out_dir.join("analysis.json");
        let data = serde_json::to_string_pretty(&report)?;
        fs::write(path, data)?;
        Ok(())
    }
}
