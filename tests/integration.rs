use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use printsplit::core::{
    bucketize, classify, format_ranges, parse_ranges, set_override, toggle_page, PixelBuffer,
};
use printsplit::export::{CsvExporter, Exporter, JsonExporter, TextExporter};
use printsplit::pipeline::{analyze_document, analyze_pdf, AnalysisConfig};
use printsplit::render::{PageSource, PdfReader, RgbaPage};
use printsplit::{ClassifierConfig, DocumentAnalysis, PageClassification};

fn temp_output_dir(prefix: &str) -> PathBuf {
    let mut out = std::env::temp_dir();
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    out.push(format!("{}-{}-{}", prefix, std::process::id(), now));
    out
}

/// Renders a white page with a colored square on every page listed in `colored`.
struct SyntheticPdf {
    colored: Vec<u32>,
    side: u32,
}

impl PageSource for SyntheticPdf {
    fn render_page(&self, page_number: u32) -> Result<RgbaPage> {
        let mut pixels = vec![255u8; (self.side * self.side * 4) as usize];
        // a few gray smudges on every page
        for px in pixels.chunks_exact_mut(4).step_by(97) {
            px.copy_from_slice(&[60, 62, 58, 255]);
        }
        if self.colored.contains(&page_number) {
            for px in pixels.chunks_exact_mut(4).take((self.side * 4) as usize) {
                px.copy_from_slice(&[30, 90, 200, 255]);
            }
        }
        Ok(RgbaPage {
            width: self.side,
            height: self.side,
            pixels,
        })
    }
}

/// Classify, bucket and format a synthetic six-page document end to end.
#[test]
fn test_pipeline_with_synthetic_pages() -> Result<()> {
    let source = SyntheticPdf {
        colored: vec![1, 2, 5],
        side: 40,
    };
    let config = AnalysisConfig::new(PathBuf::from("synthetic.pdf"), temp_output_dir("x"), 72);
    let analysis = analyze_document(&source, 6, &config)?;
    let buckets = analysis.buckets()?;

    assert_eq!(format_ranges(buckets.double_color_sheets.iter().copied()), "1-2");
    assert_eq!(format_ranges(buckets.double_bw_sheets.iter().copied()), "3-4");
    assert_eq!(format_ranges(buckets.mixed_color_pages.iter().copied()), "5");
    assert_eq!(format_ranges(buckets.mixed_bw_pages.iter().copied()), "6");
    Ok(())
}

#[test]
fn test_overrides_then_rebucket() -> Result<()> {
    let pages: Vec<PageClassification> = [false, false, false, false, true]
        .iter()
        .enumerate()
        .map(|(i, &color)| PageClassification::new(i as u32 + 1, color))
        .collect();

    let before = bucketize(&pages, 5)?;
    assert_eq!(before.double_bw_sheets, vec![1, 2, 3, 4]);
    assert_eq!(before.mixed_color_pages, vec![5]);

    let pages = set_override(&pages, &parse_ranges("3-4", 5)?, true);
    let pages = toggle_page(&pages, 5);
    let after = bucketize(&pages, 5)?;
    assert_eq!(after.double_bw_sheets, vec![1, 2]);
    assert_eq!(after.double_color_sheets, vec![3, 4]);
    assert_eq!(after.mixed_bw_pages, vec![5]);
    assert!(after.mixed_color_pages.is_empty());
    Ok(())
}

#[test]
fn test_classifier_thresholds_through_public_api() -> Result<()> {
    // light yellow highlighter: channel spread of 30 on 1% of the page
    let mut data = vec![250u8; 100 * 100 * 4];
    for px in data.chunks_exact_mut(4).take(100) {
        px.copy_from_slice(&[255, 250, 225, 255]);
    }
    let buffer = PixelBuffer::with_dimensions(100, 100, &data)?;

    assert!(classify(&buffer).is_color);
    assert!(!printsplit::classify_with(&buffer, &ClassifierConfig::HIGHLIGHTER).is_color);
    Ok(())
}

#[test]
fn test_exporters_write_all_files() -> Result<()> {
    let out = temp_output_dir("printsplit-test");
    let pages = vec![
        PageClassification::new(1, true),
        PageClassification::new(2, false).forced(true),
        PageClassification::new(3, false),
    ];
    let analysis = DocumentAnalysis::new(3, ClassifierConfig::default(), pages);

    JsonExporter::new(out.clone()).export(&analysis)?;
    CsvExporter::new(out.clone()).export(&analysis)?;
    TextExporter::new(out.clone()).export(&analysis)?;

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.join("analysis.json"))?)?;
    assert_eq!(json["buckets"]["double_color_sheets"], serde_json::json!([1, 2]));
    assert_eq!(json["buckets"]["mixed_bw_pages"], serde_json::json!([3]));
    assert_eq!(json["summary"]["double_color_sheet_count"], 1);

    let csv = fs::read_to_string(out.join("pages.csv"))?;
    assert_eq!(csv.lines().count(), 4);

    let plan = fs::read_to_string(out.join("plan.txt"))?;
    assert!(plan.contains("Single-sided B&W:    3"));

    let _ = fs::remove_dir_all(&out);
    Ok(())
}

/// Integration test: analyze a real PDF when poppler and the fixture exist
#[test]
fn test_analyze_real_pdf() -> Result<()> {
    let test_pdf = PathBuf::from("test/test_document.pdf");

    if !test_pdf.exists() {
        eprintln!("Skipping test: test/test_document.pdf not found");
        return Ok(());
    }
    if Command::new("pdftoppm").arg("-v").output().is_err() {
        eprintln!("Skipping test: pdftoppm not installed");
        return Ok(());
    }

    let total = PdfReader::new(test_pdf.clone())?.page_count()?;
    assert!(total > 0, "test_document.pdf should have at least one page");

    let out = temp_output_dir("printsplit-real");
    let config = AnalysisConfig::new(test_pdf, out.clone(), 36).with_max_pages(Some(4));
    let analysis = analyze_pdf(&config)?;

    assert_eq!(analysis.total_pages, total.min(4));
    assert_eq!(analysis.buckets()?.page_count(), analysis.total_pages as usize);

    let _ = fs::remove_dir_all(&out);
    Ok(())
}
