use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;

use crate::export::Exporter;
use crate::pipeline::DocumentAnalysis;

/// One row per classified page, in page order.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    out_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

#[derive(Serialize)]
struct PageRow {
    page: u32,
    detected: &'static str,
    forced: &'static str,
    effective: &'static str,
    color_pixels: u64,
    total_pixels: u64,
    coverage: String,
}

fn label(is_color: bool) -> &'static str {
    if is_color {
        "color"
    } else {
        "bw"
    }
}

impl Exporter for CsvExporter {
    fn export(&self, analysis: &DocumentAnalysis) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join("pages.csv");
        let mut writer = WriterBuilder::new()
            .from_path(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;

        let mut pages: Vec<_> = analysis.pages.iter().collect();
        pages.sort_by_key(|page| page.page_number);

        for page in pages {
            writer.serialize(PageRow {
                page: page.page_number,
                detected: label(page.is_color_detected),
                forced: page.is_color_user_forced.map(label).unwrap_or(""),
                effective: label(page.effective_is_color()),
                color_pixels: page.color_pixel_count,
                total_pixels: page.total_pixel_count,
                coverage: format!("{:.4}", page.coverage()),
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}
