use serde::{Deserialize, Serialize};

/// Outcome of scanning one page's pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorAnalysis {
    pub is_color: bool,
    pub color_pixel_count: u64,
    pub total_pixel_count: u64,
}

impl ColorAnalysis {
    pub fn coverage(&self) -> f64 {
        if self.total_pixel_count == 0 {
            0.0
        } else {
            self.color_pixel_count as f64 / self.total_pixel_count as f64
        }
    }
}

/// Detected and user-forced color status of a single page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageClassification {
    /// 1-based page number.
    pub page_number: u32,
    pub is_color_detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_color_user_forced: Option<bool>,
    #[serde(default)]
    pub color_pixel_count: u64,
    #[serde(default)]
    pub total_pixel_count: u64,
}

impl PageClassification {
    pub fn new(page_number: u32, is_color_detected: bool) -> Self {
        Self {
            page_number,
            is_color_detected,
            is_color_user_forced: None,
            color_pixel_count: 0,
            total_pixel_count: 0,
        }
    }

    pub fn from_analysis(page_number: u32, analysis: &ColorAnalysis) -> Self {
        Self {
            page_number,
            is_color_detected: analysis.is_color,
            is_color_user_forced: None,
            color_pixel_count: analysis.color_pixel_count,
            total_pixel_count: analysis.total_pixel_count,
        }
    }

    pub fn forced(mut self, value: bool) -> Self {
        self.is_color_user_forced = Some(value);
        self
    }

    pub fn effective_is_color(&self) -> bool {
        self.is_color_user_forced.unwrap_or(self.is_color_detected)
    }

    pub fn coverage(&self) -> f64 {
        if self.total_pixel_count == 0 {
            0.0
        } else {
            self.color_pixel_count as f64 / self.total_pixel_count as f64
        }
    }
}

/// How one physical sheet (odd page plus its even back side) is printed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    DoubleColor,
    DoubleBw,
    Mixed,
    Single,
}

impl SheetKind {
    pub fn label(&self) -> &'static str {
        match self {
            SheetKind::DoubleColor => "double color",
            SheetKind::DoubleBw => "double b&w",
            SheetKind::Mixed => "mixed",
            SheetKind::Single => "single",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetBucketResult {
    pub double_color_sheets: Vec<u32>,
    pub double_bw_sheets: Vec<u32>,
    pub mixed_color_pages: Vec<u32>,
    pub mixed_bw_pages: Vec<u32>,
}

impl SheetBucketResult {
    pub fn page_count(&self) -> usize {
        self.double_color_sheets.len()
            + self.double_bw_sheets.len()
            + self.mixed_color_pages.len()
            + self.mixed_bw_pages.len()
    }

    pub fn summary(&self) -> PrintPlanSummary {
        PrintPlanSummary {
            color_pages: self.double_color_sheets.len() + self.mixed_color_pages.len(),
            bw_pages: self.double_bw_sheets.len() + self.mixed_bw_pages.len(),
            double_color_sheet_count: self.double_color_sheets.len() / 2,
            double_bw_sheet_count: self.double_bw_sheets.len() / 2,
            single_color_page_count: self.mixed_color_pages.len(),
            single_bw_page_count: self.mixed_bw_pages.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrintPlanSummary {
    pub color_pages: usize,
    pub bw_pages: usize,
    pub double_color_sheet_count: usize,
    pub double_bw_sheet_count: usize,
    pub single_color_page_count: usize,
    pub single_bw_page_count: usize,
}

impl PrintPlanSummary {
    /// Physical sheets of paper the plan consumes.
    pub fn sheet_count(&self) -> usize {
        self.double_color_sheet_count
            + self.double_bw_sheet_count
            + self.single_color_page_count
            + self.single_bw_page_count
    }
}
