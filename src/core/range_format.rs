use crate::core::error::CoreError;

const EMPTY: &str = "None";

/// Collapse page numbers into `"1-3, 5, 7-8"` form. Empty input gives `"None"`.
pub fn format_ranges<I>(pages: I) -> String
where
    I: IntoIterator<Item = u32>,
{
    let mut sorted: Vec<u32> = pages.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let Some((&first, rest)) = sorted.split_first() else {
        return EMPTY.to_string();
    };

    let mut tokens = Vec::new();
    let (mut start, mut prev) = (first, first);
    for &page in rest {
        if prev.checked_add(1) == Some(page) {
            prev = page;
            continue;
        }
        tokens.push(range_token(start, prev));
        start = page;
        prev = page;
    }
    tokens.push(range_token(start, prev));

    tokens.join(", ")
}

fn range_token(start: u32, end: u32) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{start}-{end}")
    }
}

/// Read a range string back into sorted, distinct page numbers within
/// `1..=total_pages`. Accepts the output of [`format_ranges`].
pub fn parse_ranges(text: &str, total_pages: u32) -> Result<Vec<u32>, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(EMPTY) {
        return Ok(Vec::new());
    }

    let mut pages = Vec::new();
    for token in trimmed.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (start, end) = match token.split_once('-') {
            Some((a, b)) => (parse_page(a, total_pages)?, parse_page(b, total_pages)?),
            None => {
                let page = parse_page(token, total_pages)?;
                (page, page)
            }
        };
        if start > end {
            return Err(CoreError::invalid_page(
                start,
                format!("range {token} runs backwards"),
            ));
        }
        pages.extend(start..=end);
    }

    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

fn parse_page(raw: &str, total_pages: u32) -> Result<u32, CoreError> {
    let raw = raw.trim();
    let page: i64 = raw
        .parse()
        .map_err(|_| CoreError::invalid_page(0u32, format!("not a page number: {raw:?}")))?;
    if page < 1 {
        return Err(CoreError::invalid_page(page, "page numbers are 1-based"));
    }
    if page > i64::from(total_pages) {
        return Err(CoreError::invalid_page(
            page,
            format!("document has {total_pages} pages"),
        ));
    }
    Ok(page as u32)
}
