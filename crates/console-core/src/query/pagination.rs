//! Page arithmetic shared by server-side and client-side pagination.

/// Rows per page unless the config says otherwise
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Read the `page` search parameter; anything but a positive integer is page 1
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// Number of reachable pages for `total` rows. An empty set still has page 1.
pub fn page_count(total: usize, size: usize) -> usize {
    if size == 0 {
        return 1;
    }
    total.div_ceil(size).max(1)
}

/// A 1-based page of fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: u32, size: usize) -> Self {
        Self { page: page.max(1), size: size.max(1) }
    }

    /// Backend `skip` parameter
    pub fn skip(&self) -> usize {
        (self.page as usize - 1) * self.size
    }

    /// Backend `limit` parameter
    pub fn limit(&self) -> usize {
        self.size
    }

    pub fn next(&self) -> Self {
        Self { page: self.page + 1, size: self.size }
    }

    pub fn previous(&self) -> Option<Self> {
        (self.page > 1).then(|| Self { page: self.page - 1, size: self.size })
    }
}

/// Client-side slice of an already fully loaded set
pub fn slice_page<T: Clone>(rows: &[T], request: PageRequest) -> Vec<T> {
    rows.iter().skip(request.skip()).take(request.limit()).cloned().collect()
}

/// What the Previous / Next controls may do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerState {
    pub page: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Default for PagerState {
    /// First page, nothing to move to
    fn default() -> Self {
        Self { page: 1, has_previous: false, has_next: false }
    }
}

impl PagerState {
    /// Pager for a page the backend sliced.
    ///
    /// A reported total decides exactly; otherwise the backend's own hint,
    /// otherwise a short slice means this is the last page. Never offers
    /// "next" while placeholder rows from another page are on screen.
    pub fn for_server_page(
        request: PageRequest,
        returned: usize,
        total: Option<u64>,
        backend_hint: Option<bool>,
        is_placeholder: bool,
    ) -> Self {
        let has_next = !is_placeholder
            && match (total, backend_hint) {
                (Some(total), _) => (request.page as u64) * (request.size as u64) < total,
                (None, Some(hint)) => hint,
                (None, None) => returned == request.size,
            };
        Self { page: request.page, has_previous: request.page > 1, has_next }
    }

    /// Pager for a slice taken client-side from `total` rows
    pub fn for_local(request: PageRequest, total: usize) -> Self {
        Self {
            page: request.page,
            has_previous: request.page > 1,
            has_next: (request.page as usize) < page_count(total, request.size),
        }
    }
}
