use serde::{Deserialize, Serialize};

use crate::core::error::CoreError;
use crate::core::model::ColorAnalysis;

const CHANNELS: usize = 4;

/// Borrowed RGBA samples of one rendered page.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, CoreError> {
        if data.len() % CHANNELS != 0 {
            return Err(CoreError::invalid_buffer(
                data.len(),
                "length is not a multiple of 4 (RGBA)",
            ));
        }
        Ok(Self { data })
    }

    pub fn with_dimensions(width: u32, height: u32, data: &'a [u8]) -> Result<Self, CoreError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or_else(|| {
                CoreError::invalid_buffer(data.len(), format!("{width}x{height} overflows"))
            })?;
        if data.len() != expected {
            return Err(CoreError::invalid_buffer(
                data.len(),
                format!("expected {expected} bytes for {width}x{height}"),
            ));
        }
        Self::new(data)
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Thresholds for the per-pixel chroma test and the page coverage gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// A pixel is colored when its largest channel difference exceeds this.
    pub variance_threshold: u8,
    /// A page is colored when the colored-pixel fraction exceeds this.
    pub coverage_threshold: f64,
}

impl ClassifierConfig {
    /// Tolerates light highlighter strokes and signature ink.
    pub const HIGHLIGHTER: ClassifierConfig = ClassifierConfig {
        variance_threshold: 32,
        coverage_threshold: 0.002,
    };
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            variance_threshold: 20,
            coverage_threshold: 0.002,
        }
    }
}

pub fn classify(buffer: &PixelBuffer<'_>) -> ColorAnalysis {
    classify_with(buffer, &ClassifierConfig::default())
}

pub fn classify_with(buffer: &PixelBuffer<'_>, config: &ClassifierConfig) -> ColorAnalysis {
    let total_pixel_count = buffer.pixel_count() as u64;
    if total_pixel_count == 0 {
        return ColorAnalysis {
            is_color: false,
            color_pixel_count: 0,
            total_pixel_count: 0,
        };
    }

    let color_pixel_count = buffer
        .data
        .chunks_exact(CHANNELS)
        .filter(|px| max_channel_diff(px[0], px[1], px[2]) > config.variance_threshold)
        .count() as u64;

    let coverage = color_pixel_count as f64 / total_pixel_count as f64;
    ColorAnalysis {
        is_color: coverage > config.coverage_threshold,
        color_pixel_count,
        total_pixel_count,
    }
}

// Zero for any gray level, so brightness and luma noise do not count.
fn max_channel_diff(r: u8, g: u8, b: u8) -> u8 {
    r.abs_diff(g).max(r.abs_diff(b)).max(g.abs_diff(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(pixels: usize, rgba: [u8; 4]) -> Vec<u8> {
        rgba.iter().copied().cycle().take(pixels * 4).collect()
    }

    #[test]
    fn gray_pages_are_bw_at_any_brightness() {
        for level in [0u8, 17, 128, 200, 255] {
            let data = solid(64, [level, level, level, 255]);
            let buffer = PixelBuffer::new(&data).unwrap();
            let result = classify(&buffer);
            assert!(!result.is_color, "level {level}");
            assert_eq!(result.color_pixel_count, 0);
            assert_eq!(result.total_pixel_count, 64);
        }
    }

    #[test]
    fn empty_buffer_is_bw_without_error() {
        let buffer = PixelBuffer::new(&[]).unwrap();
        assert_eq!(
            classify(&buffer),
            ColorAnalysis {
                is_color: false,
                color_pixel_count: 0,
                total_pixel_count: 0,
            }
        );
    }

    #[test]
    fn rejects_truncated_buffer() {
        let err = PixelBuffer::new(&[1, 2, 3, 4, 5]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidBuffer { len: 5, .. }));
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let data = solid(4, [0, 0, 0, 255]);
        assert!(PixelBuffer::with_dimensions(2, 2, &data).is_ok());
        assert!(PixelBuffer::with_dimensions(3, 2, &data).is_err());
        assert!(PixelBuffer::with_dimensions(u32::MAX, u32::MAX, &data).is_err());
    }

    #[test]
    fn stray_specks_stay_below_coverage_gate() {
        // 1 red pixel in 1000 is 0.1% coverage.
        let mut data = solid(1000, [250, 250, 250, 255]);
        data[0..4].copy_from_slice(&[255, 0, 0, 255]);
        let result = classify(&PixelBuffer::new(&data).unwrap());
        assert_eq!(result.color_pixel_count, 1);
        assert!(!result.is_color);
    }

    #[test]
    fn colored_region_above_gate_is_color() {
        let mut data = solid(1000, [255, 255, 255, 255]);
        for px in data.chunks_exact_mut(4).take(3) {
            px.copy_from_slice(&[0, 0, 255, 255]);
        }
        let result = classify(&PixelBuffer::new(&data).unwrap());
        assert_eq!(result.color_pixel_count, 3);
        assert!(result.is_color);
    }

    #[test]
    fn variance_threshold_is_strict_and_configurable() {
        // maxDiff of exactly 20 is not a color pixel with the default.
        let data = solid(10, [120, 100, 110, 0]);
        let buffer = PixelBuffer::new(&data).unwrap();
        assert_eq!(classify(&buffer).color_pixel_count, 0);

        let data = solid(10, [130, 100, 110, 0]);
        let buffer = PixelBuffer::new(&data).unwrap();
        assert!(classify(&buffer).is_color);
        assert!(!classify_with(&buffer, &ClassifierConfig::HIGHLIGHTER).is_color);
    }

    #[test]
    fn alpha_channel_is_ignored() {
        let opaque = solid(8, [90, 90, 90, 255]);
        let clear = solid(8, [90, 90, 90, 0]);
        assert_eq!(
            classify(&PixelBuffer::new(&opaque).unwrap()),
            classify(&PixelBuffer::new(&clear).unwrap())
        );
    }
}
