use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone)]
pub struct PdfReader {
    path: PathBuf,
}

impl PdfReader {
    pub fn new(path: PathBuf) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("PDF not found: {}", path.display());
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> Result<u32> {
        let output = Command::new("pdfinfo")
            .arg(&self.path)
            .output()
            .with_context(|| format!("failed to invoke pdfinfo on {}", self.path.display()))?;

        if !output.status.success() {
            anyhow::bail!("pdfinfo failed with status: {}", output.status);
        }

        parse_page_count(&String::from_utf8_lossy(&output.stdout))
            .with_context(|| format!("unreadable pdfinfo output for {}", self.path.display()))
    }
}

fn parse_page_count(pdfinfo_stdout: &str) -> Result<u32> {
    for line in pdfinfo_stdout.lines() {
        if let Some(rest) = line.strip_prefix("Pages:") {
            let num_str = rest.trim();
            let pages: u32 = num_str.parse().with_context(|| {
                format!("failed to parse page count from 'Pages:' line: {num_str}")
            })?;
            return Ok(pages);
        }
    }

    anyhow::bail!("pdfinfo output did not contain a 'Pages:' line");
}
