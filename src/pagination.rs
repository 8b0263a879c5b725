//! In-memory pagination over an ordered article list.
//!
//! Request parameters arrive as raw strings and are resolved leniently:
//! anything that isn't a positive integer falls back to the default, and
//! an out-of-range page number is clamped to the nearest valid page. A
//! listing request never fails because of bad pagination input.

/// One page of an ordered sequence plus navigation metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Resolve a raw `per_page` query value. Non-numeric or non-positive
/// input falls back to `default`; valid input is capped at `max`.
pub fn resolve_per_page(raw: Option<&str>, default: usize, max: usize) -> usize {
    match raw.and_then(|v| v.trim().parse::<usize>().ok()) {
        Some(n) if n >= 1 => n.min(max),
        _ => default,
    }
}

/// Resolve a raw `page` query value. Anything below 1 or unparsable
/// becomes page 1; clamping to the last page happens in [`paginate`].
pub fn resolve_page(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Slice `items` into the requested page.
///
/// An empty input still yields one (empty) page, and a page number past
/// the end resolves to the last page.
pub fn paginate<T>(items: Vec<T>, per_page: usize, page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let number = page.clamp(1, total_pages);

    let start = (number - 1) * per_page;
    let items: Vec<T> = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        number,
        per_page,
        total_items,
        total_pages,
    }
}
