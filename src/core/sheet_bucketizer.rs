use std::collections::HashMap;

use crate::core::error::CoreError;
use crate::core::model::{PageClassification, SheetBucketResult, SheetKind};

/// Decide how a sheet prints from the effective status of its sides.
/// `back` is `None` for a trailing unpaired page.
pub fn sheet_kind(front: bool, back: Option<bool>) -> SheetKind {
    match back {
        None => SheetKind::Single,
        Some(back) if front && back => SheetKind::DoubleColor,
        Some(back) if !front && !back => SheetKind::DoubleBw,
        Some(_) => SheetKind::Mixed,
    }
}

/// Partition pages `1..=total_pages` into duplex sheets and single-sided
/// leftovers. Sheets are positional: odd page `i` is the front of `i + 1`.
/// Pages without a record count as black-and-white.
pub fn bucketize(
    pages: &[PageClassification],
    total_pages: u32,
) -> Result<SheetBucketResult, CoreError> {
    let status = effective_status(pages, total_pages)?;
    let is_color = |page: u32| status.get(&page).copied().unwrap_or(false);

    let mut result = SheetBucketResult::default();
    for front in (1..=total_pages).step_by(2) {
        let front_color = is_color(front);
        let back = front.checked_add(1).filter(|&back| back <= total_pages);

        match sheet_kind(front_color, back.map(is_color)) {
            SheetKind::DoubleColor => result.double_color_sheets.extend([front, front + 1]),
            SheetKind::DoubleBw => result.double_bw_sheets.extend([front, front + 1]),
            SheetKind::Mixed | SheetKind::Single => {
                for page in std::iter::once(front).chain(back) {
                    if is_color(page) {
                        result.mixed_color_pages.push(page);
                    } else {
                        result.mixed_bw_pages.push(page);
                    }
                }
            }
        }
    }

    Ok(result)
}

fn effective_status(
    pages: &[PageClassification],
    total_pages: u32,
) -> Result<HashMap<u32, bool>, CoreError> {
    let mut status = HashMap::with_capacity(pages.len());
    for page in pages {
        if page.page_number == 0 {
            return Err(CoreError::invalid_page(0u32, "page numbers are 1-based"));
        }
        if page.page_number > total_pages {
            return Err(CoreError::invalid_page(
                page.page_number,
                format!("document has {total_pages} pages"),
            ));
        }
        if status
            .insert(page.page_number, page.effective_is_color())
            .is_some()
        {
            return Err(CoreError::invalid_page(page.page_number, "duplicate page"));
        }
    }
    Ok(status)
}
