use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use printsplit::core::{parse_ranges, ClassifierConfig, PageClassification};
use printsplit::export::text_export::render_plan;
use printsplit::export::ExportFormat;
use printsplit::pipeline::{analyze_pdf, export_analysis, AnalysisConfig, DocumentAnalysis};
use printsplit::render::PdfReader;

#[derive(Parser, Debug)]
#[command(name = "printsplit")]
#[command(version, about = "Split a PDF into duplex color, duplex B&W and single-sided print jobs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify every page of a PDF and print the sheet plan
    Analyze {
        /// Input PDF file path
        input: PathBuf,

        /// Output directory (default: ./<input_name>_print)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format(s) to write
        #[arg(short, long, value_enum, default_values_t = vec![Format::Text, Format::Csv])]
        format: Vec<Format>,

        /// Rendering DPI for classification
        #[arg(long, default_value_t = 50)]
        dpi: u32,

        /// Channel difference above which a pixel counts as colored
        #[arg(long, default_value_t = 20)]
        variance_threshold: u8,

        /// Fraction of colored pixels above which a page is color
        #[arg(long, default_value_t = 0.002)]
        coverage_threshold: f64,

        /// Use thresholds that ignore light highlighter and signature ink
        #[arg(long, conflicts_with_all = ["variance_threshold", "coverage_threshold"])]
        highlighter: bool,

        /// Pages to force to color, e.g. "1-3, 7"
        #[arg(long)]
        force_color: Option<String>,

        /// Pages to force to black-and-white
        #[arg(long)]
        force_bw: Option<String>,

        /// Pages whose detected status should be flipped
        #[arg(long)]
        toggle: Option<String>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u32>,

        /// Keep the rendered PNG pages in the output directory
        #[arg(long)]
        keep_images: bool,

        /// Only print errors
        #[arg(short, long)]
        quiet: bool,
    },

    /// Build a sheet plan from a known list of color pages, without a PDF
    Plan {
        /// Total number of pages in the document
        #[arg(long)]
        total: u32,

        /// Color pages, e.g. "1-2, 5"
        #[arg(long, default_value = "")]
        color: String,
    },

    /// Show information about a PDF file
    Info {
        /// Input PDF file path
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Format {
    Json,
    Csv,
    Text,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => ExportFormat::Json,
            Format::Csv => ExportFormat::Csv,
            Format::Text => ExportFormat::Text,
        }
    }
}

struct OverrideArgs {
    force_color: Option<String>,
    force_bw: Option<String>,
    toggle: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            format,
            dpi,
            variance_threshold,
            coverage_threshold,
            highlighter,
            force_color,
            force_bw,
            toggle,
            max_pages,
            keep_images,
            quiet,
        } => {
            let classifier = if highlighter {
                ClassifierConfig::HIGHLIGHTER
            } else {
                ClassifierConfig {
                    variance_threshold,
                    coverage_threshold,
                }
            };
            let overrides = OverrideArgs {
                force_color,
                force_bw,
                toggle,
            };
            let options = AnalyzeOptions {
                dpi,
                classifier,
                max_pages,
                keep_images,
                quiet,
            };
            analyze(input, output, format, options, overrides)
        }
        Commands::Plan { total, color } => plan(total, &color),
        Commands::Info { input } => show_info(input),
    }
}

struct AnalyzeOptions {
    dpi: u32,
    classifier: ClassifierConfig,
    max_pages: Option<u32>,
    keep_images: bool,
    quiet: bool,
}

fn analyze(
    input: PathBuf,
    output: Option<PathBuf>,
    formats: Vec<Format>,
    options: AnalyzeOptions,
    overrides: OverrideArgs,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if !input.is_file() {
        anyhow::bail!("Input is not a file: {}", input.display());
    }

    let output_dir = match output {
        Some(dir) => dir,
        None => {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_string());
            PathBuf::from(format!("{}_print", stem))
        }
    };

    let quiet = options.quiet;
    if !quiet {
        println!("[*] Processing: {}", input.display());
        println!("[*] Output: {}", output_dir.display());
        println!(
            "[*] DPI: {}, variance > {}, coverage > {:.2}%",
            options.dpi,
            options.classifier.variance_threshold,
            options.classifier.coverage_threshold * 100.0
        );
        println!("\n[+] Classifying pages...");
    }

    let config = AnalysisConfig::new(input.clone(), output_dir.clone(), options.dpi)
        .with_classifier(options.classifier)
        .with_max_pages(options.max_pages)
        .with_keep_images(options.keep_images);

    let analysis = analyze_pdf(&config)
        .with_context(|| format!("Failed to analyze PDF: {}", input.display()))?;
    let analysis = apply_overrides(analysis, &overrides)?;

    let buckets = analysis.buckets()?;
    if !quiet {
        println!("\n{}", render_plan(&analysis, &buckets));
        println!("[+] Exporting results...");
    }

    let formats: Vec<ExportFormat> = formats.into_iter().map(ExportFormat::from).collect();
    export_analysis(&analysis, &output_dir, &formats)
        .with_context(|| format!("Failed to export to: {}", output_dir.display()))?;

    if !quiet {
        println!("\n[✓] Done! Results saved to: {}", output_dir.display());
    }

    Ok(())
}

fn apply_overrides(analysis: DocumentAnalysis, overrides: &OverrideArgs) -> Result<DocumentAnalysis> {
    let total = analysis.total_pages;
    let mut analysis = analysis;

    if let Some(ranges) = &overrides.force_color {
        let pages = parse_ranges(ranges, total).context("invalid --force-color pages")?;
        analysis = analysis.with_override(&pages, true);
    }
    if let Some(ranges) = &overrides.force_bw {
        let pages = parse_ranges(ranges, total).context("invalid --force-bw pages")?;
        analysis = analysis.with_override(&pages, false);
    }
    if let Some(ranges) = &overrides.toggle {
        for page in parse_ranges(ranges, total).context("invalid --toggle pages")? {
            analysis = analysis.with_toggle(page);
        }
    }

    if analysis.forced_count() > 0 {
        tracing::info!(forced = analysis.forced_count(), "applied manual overrides");
    }
    Ok(analysis)
}

fn plan(total: u32, color: &str) -> Result<()> {
    let color_pages = parse_ranges(color, total).context("invalid --color pages")?;
    let pages = (1..=total)
        .map(|page| PageClassification::new(page, color_pages.contains(&page)))
        .collect();
    let analysis = DocumentAnalysis::new(total, ClassifierConfig::default(), pages);
    let buckets = analysis.buckets()?;

    print!("{}", render_plan(&analysis, &buckets));
    Ok(())
}

fn show_info(input: PathBuf) -> Result<()> {
    let reader = PdfReader::new(input.clone())
        .with_context(|| format!("Failed to open PDF: {}", input.display()))?;

    let page_count = reader.page_count()?;

    println!("PDF Information");
    println!("===============");
    println!("File: {}", input.display());
    println!("Pages: {}", page_count);
    println!("Sheets (duplex): {}", page_count.div_ceil(2));

    Ok(())
}
