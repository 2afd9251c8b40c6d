use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The first `page_size * page_count` items of `items`.
pub fn window<T>(items: &[T], page_size: usize, page_count: usize) -> &[T] {
    let end = page_size.saturating_mul(page_count).min(items.len());
    &items[..end]
}

/// Load-more pagination state. `page_size` and `page_count` are both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page_size: usize,
    page_count: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page_count: 1,
        }
    }

    /// Restore a position, e.g. from a `?page=N` query.
    pub fn at_page(page_size: usize, page_count: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page_count: page_count.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn visible_len(&self, total: usize) -> usize {
        self.page_size.saturating_mul(self.page_count).min(total)
    }

    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        window(items, self.page_size, self.page_count)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible_len(total) < total
    }

    /// Reveal one more page. No-op when everything is already visible.
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.page_count += 1;
        true
    }

    pub fn reset(&mut self) {
        self.page_count = 1;
    }
}
