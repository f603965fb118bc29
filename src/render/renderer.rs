use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::render::{PageSource, RgbaPage};

/// Rasterizes single pages with poppler's `pdftoppm` and decodes them to RGBA.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    pdf_path: PathBuf,
    out_dir: PathBuf,
    dpi: u32,
    keep_images: bool,
}

impl PageRenderer {
    pub fn new(pdf_path: PathBuf, out_dir: PathBuf, dpi: u32) -> Self {
        Self {
            pdf_path,
            out_dir,
            dpi,
            keep_images: false,
        }
    }

    pub fn keep_images(mut self, keep: bool) -> Self {
        self.keep_images = keep;
        self
    }

    pub fn render_to_png(&self, page_number: u32) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)?;

        let prefix = self.out_dir.join(format!("page_{:03}", page_number));
        let prefix_str = prefix
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("non-UTF8 output path not supported"))?;

        let status = Command::new("pdftoppm")
            .arg("-png")
            .arg("-singlefile")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-f")
            .arg(page_number.to_string())
            .arg("-l")
            .arg(page_number.to_string())
            .arg(&self.pdf_path)
            .arg(prefix_str)
            .status()
            .with_context(|| "failed to invoke pdftoppm; is poppler-utils installed?")?;

        if !status.success() {
            anyhow::bail!("pdftoppm failed on page {page_number} with status: {status}");
        }

        // -singlefile drops the page suffix: `<prefix>.png`
        let image_path = prefix.with_extension("png");
        if !image_path.exists() {
            anyhow::bail!(
                "expected rendered image not found: {}",
                image_path.display()
            );
        }
        Ok(image_path)
    }
}

impl PageSource for PageRenderer {
    fn render_page(&self, page_number: u32) -> Result<RgbaPage> {
        let path = self.render_to_png(page_number)?;
        let page = load_rgba(&path)?;
        tracing::debug!(
            page_number,
            width = page.width,
            height = page.height,
            dpi = self.dpi,
            "rendered page"
        );
        if !self.keep_images {
            if let Err(err) = fs::remove_file(&path) {
                tracing::warn!("could not remove {}: {}", path.display(), err);
            }
        }
        Ok(page)
    }
}

pub fn load_rgba(path: &Path) -> Result<RgbaPage> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode rendered page {}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    Ok(RgbaPage {
        width,
        height,
        pixels: image.into_raw(),
    })
}
