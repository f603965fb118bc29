pub mod pdf_reader;
pub mod renderer;

pub use pdf_reader::PdfReader;
pub use renderer::PageRenderer;

use anyhow::Result;

use crate::core::{CoreError, PixelBuffer};

/// One rasterized page, row-major RGBA.
#[derive(Debug, Clone)]
pub struct RgbaPage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaPage {
    pub fn buffer(&self) -> Result<PixelBuffer<'_>, CoreError> {
        PixelBuffer::with_dimensions(self.width, self.height, &self.pixels)
    }
}

/// Anything that can hand over the pixels of page `page_number` (1-based).
pub trait PageSource {
    fn render_page(&self, page_number: u32) -> Result<RgbaPage>;
}
