//! Manual color/B&W overrides as pure transitions over a page list.

use crate::core::model::PageClassification;

/// Force every page in `targets` to `value`. Other pages, and targets with
/// no record, are left as they are.
pub fn set_override(
    pages: &[PageClassification],
    targets: &[u32],
    value: bool,
) -> Vec<PageClassification> {
    pages
        .iter()
        .map(|page| {
            if targets.contains(&page.page_number) {
                page.clone().forced(value)
            } else {
                page.clone()
            }
        })
        .collect()
}

/// Flip the effective status of one page. The result is always a forced
/// value, so toggling twice keeps an override equal to the detection.
pub fn toggle_page(pages: &[PageClassification], page_number: u32) -> Vec<PageClassification> {
    pages
        .iter()
        .map(|page| {
            if page.page_number == page_number {
                let flipped = !page.effective_is_color();
                page.clone().forced(flipped)
            } else {
                page.clone()
            }
        })
        .collect()
}
