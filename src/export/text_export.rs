use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::{format_ranges, sheet_kind, PageClassification, SheetBucketResult};
use crate::export::Exporter;
use crate::pipeline::DocumentAnalysis;

#[derive(Debug, Clone)]
pub struct TextExporter {
    out_dir: PathBuf,
}

impl TextExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

/// Human-readable print plan: bucket ranges, totals, then one line per sheet.
pub fn render_plan(analysis: &DocumentAnalysis, buckets: &SheetBucketResult) -> String {
    let summary = buckets.summary();
    let mut text = String::new();

    text.push_str("=== Print plan ===\n\n");
    text.push_str(&format!(
        "Double-sided color:  {}\n",
        format_ranges(buckets.double_color_sheets.iter().copied())
    ));
    text.push_str(&format!(
        "Double-sided B&W:    {}\n",
        format_ranges(buckets.double_bw_sheets.iter().copied())
    ));
    text.push_str(&format!(
        "Single-sided color:  {}\n",
        format_ranges(buckets.mixed_color_pages.iter().copied())
    ));
    text.push_str(&format!(
        "Single-sided B&W:    {}\n\n",
        format_ranges(buckets.mixed_bw_pages.iter().copied())
    ));

    text.push_str(&format!(
        "Pages: {} ({} color, {} b&w), sheets: {}\n",
        analysis.total_pages,
        summary.color_pages,
        summary.bw_pages,
        summary.sheet_count()
    ));

    let status = |page: u32| {
        analysis
            .pages
            .iter()
            .find(|p| p.page_number == page)
            .map(PageClassification::effective_is_color)
            .unwrap_or(false)
    };
    text.push_str("\n=== Sheets ===\n\n");
    for front in (1..=analysis.total_pages).step_by(2) {
        let back = front.checked_add(1).filter(|&b| b <= analysis.total_pages);
        let kind = sheet_kind(status(front), back.map(status));
        match back {
            Some(back) => text.push_str(&format!("{front:>4}-{back:<4} {}\n", kind.label())),
            None => text.push_str(&format!("{front:>4}      {}\n", kind.label())),
        }
    }

    text
}

impl Exporter for TextExporter {
    fn export(&self, analysis: &DocumentAnalysis) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        let buckets = analysis.buckets()?;
        let path = self.out_dir.join("plan.txt");
        fs::write(path, render_plan(analysis, &buckets))?;
        Ok(())
    }
}
