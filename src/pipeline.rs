use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{
    bucketize, classify_with, set_override, toggle_page, ClassifierConfig, CoreError,
    PageClassification, PrintPlanSummary, SheetBucketResult,
};
use crate::export::csv_export::CsvExporter;
use crate::export::json_export::JsonExporter;
use crate::export::text_export::TextExporter;
use crate::export::{ExportFormat, Exporter};
use crate::render::{PageRenderer, PageSource, PdfReader};

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dpi: u32,
    pub classifier: ClassifierConfig,
    /// Stop after this many pages; the plan then covers only that prefix.
    pub max_pages: Option<u32>,
    pub keep_images: bool,
}

impl AnalysisConfig {
    pub fn new(input: PathBuf, output: PathBuf, dpi: u32) -> Self {
        Self {
            input,
            output,
            dpi,
            classifier: ClassifierConfig::default(),
            max_pages: None,
            keep_images: false,
        }
    }

    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_keep_images(mut self, keep: bool) -> Self {
        self.keep_images = keep;
        self
    }
}

/// Classified pages of one document. Overrides produce a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub total_pages: u32,
    pub classifier: ClassifierConfig,
    pub pages: Vec<PageClassification>,
}

impl DocumentAnalysis {
    pub fn new(
        total_pages: u32,
        classifier: ClassifierConfig,
        pages: Vec<PageClassification>,
    ) -> Self {
        Self {
            total_pages,
            classifier,
            pages,
        }
    }

    pub fn buckets(&self) -> Result<SheetBucketResult, CoreError> {
        bucketize(&self.pages, self.total_pages)
    }

    pub fn summary(&self) -> Result<PrintPlanSummary, CoreError> {
        Ok(self.buckets()?.summary())
    }

    pub fn with_override(&self, targets: &[u32], value: bool) -> Self {
        Self {
            pages: set_override(&self.pages, targets, value),
            ..self.clone()
        }
    }

    pub fn with_toggle(&self, page_number: u32) -> Self {
        Self {
            pages: toggle_page(&self.pages, page_number),
            ..self.clone()
        }
    }

    pub fn forced_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|page| page.is_color_user_forced.is_some())
            .count()
    }
}

/// Classify pages `1..=total_pages` of `source` one at a time.
pub fn analyze_document<S: PageSource>(
    source: &S,
    total_pages: u32,
    config: &AnalysisConfig,
) -> Result<DocumentAnalysis> {
    let limit = match config.max_pages {
        Some(max) if max < total_pages => {
            tracing::warn!(max, total_pages, "stopping analysis early");
            max
        }
        _ => total_pages,
    };

    let mut pages = Vec::with_capacity(limit as usize);
    for page_number in 1..=limit {
        let rendered = source
            .render_page(page_number)
            .with_context(|| format!("failed to render page {page_number}"))?;
        let buffer = rendered
            .buffer()
            .with_context(|| format!("bad pixel buffer for page {page_number}"))?;
        let analysis = classify_with(&buffer, &config.classifier);
        tracing::info!(
            page_number,
            is_color = analysis.is_color,
            coverage = analysis.coverage(),
            "classified page {}/{}",
            page_number,
            limit
        );
        pages.push(PageClassification::from_analysis(page_number, &analysis));
    }

    Ok(DocumentAnalysis::new(limit, config.classifier, pages))
}

/// Analyze the PDF named by `config.input` using poppler for rendering.
pub fn analyze_pdf(config: &AnalysisConfig) -> Result<DocumentAnalysis> {
    let reader = PdfReader::new(config.input.clone())?;
    let total_pages = reader.page_count()?;
    tracing::debug!(total_pages, dpi = config.dpi, "opened {}", reader.path().display());

    let renderer = PageRenderer::new(
        reader.path().to_path_buf(),
        config.output.join("pages"),
        config.dpi,
    )
    .keep_images(config.keep_images);

    analyze_document(&renderer, total_pages, config)
}

pub fn export_analysis(
    analysis: &DocumentAnalysis,
    output: &Path,
    formats: &[ExportFormat],
) -> Result<()> {
    for format in formats {
        let exporter: Box<dyn Exporter> = match format {
            ExportFormat::Json => Box::new(JsonExporter::new(output.to_path_buf())),
            ExportFormat::Csv => Box::new(CsvExporter::new(output.to_path_buf())),
            ExportFormat::Text => Box::new(TextExporter::new(output.to_path_buf())),
        };
        exporter
            .export(analysis)
            .with_context(|| format!("{format:?} export failed"))?;
    }
    Ok(())
}
