//! Per-screen state of a server-paginated list.
//!
//! Every fetch the view starts carries a [`Ticket`]. Moving to another page
//! bumps the view generation, so answers and prefetches issued for the old
//! page can no longer land on screen.

use crate::domain::{ListPage, Resource};
use crate::error::ApiError;

use super::cache::{Lookup, QueryCache, QueryKey};
use super::pagination::{page_count, PageRequest, PagerState};

/// Identifies one outstanding request of a [`PagedList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub request: PageRequest,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    resource: Resource,
    request: PageRequest,
    generation: u64,
    page: Option<ListPage<T>>,
    /// Rows on screen belong to the previously shown page
    placeholder: bool,
    fetching: bool,
    error: Option<ApiError>,
}

impl<T: Clone + Send + Sync + 'static> PagedList<T> {
    pub fn new(resource: Resource, page_size: usize) -> Self {
        Self {
            resource,
            request: PageRequest::new(1, page_size),
            generation: 0,
            page: None,
            placeholder: false,
            fetching: false,
            error: None,
        }
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }

    pub fn key(&self) -> QueryKey {
        QueryKey::page(self.resource, self.request)
    }

    /// Switch to `page`, serving cached rows right away.
    /// Returns a ticket when the backend has to be asked.
    pub fn show(&mut self, page: u32, cache: &QueryCache) -> Option<Ticket> {
        self.generation += 1;
        self.request = PageRequest::new(page, self.request.size);
        self.error = None;
        let ticket = Ticket { request: self.request, generation: self.generation };

        match cache.lookup::<ListPage<T>>(&self.key()) {
            Lookup::Fresh(rows) => {
                self.page = Some(rows);
                self.placeholder = false;
                self.fetching = false;
                None
            }
            Lookup::Stale(rows) => {
                self.page = Some(rows);
                self.placeholder = false;
                self.fetching = true;
                Some(ticket)
            }
            Lookup::Missing => {
                // Keep the previous page visible until the new one arrives
                self.placeholder = self.page.is_some();
                self.fetching = true;
                Some(ticket)
            }
        }
    }

    /// Same page again, e.g. after its cache entries were invalidated
    pub fn refresh(&mut self, cache: &QueryCache) -> Option<Ticket> {
        self.show(self.request.page, cache)
    }

    /// Record a fetch result. The cache always keeps a successful answer;
    /// the view only takes it when `ticket` is still current.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        result: Result<ListPage<T>, ApiError>,
        cache: &mut QueryCache,
    ) -> bool {
        if let Ok(rows) = &result {
            cache.store(QueryKey::page(self.resource, ticket.request), rows.clone());
        }
        if ticket.generation != self.generation {
            log::debug!("dropping outdated {} page {}", self.resource.path(), ticket.request.page);
            return false;
        }
        self.fetching = false;
        match result {
            Ok(rows) => {
                self.page = Some(rows);
                self.placeholder = false;
            }
            Err(err) => {
                let path = self.resource.path();
                log::warn!("loading {} page {} failed: {}", path, ticket.request.page, err);
                self.error = Some(err);
            }
        }
        true
    }

    /// Ticket for prefetching the following page, if one exists and isn't cached
    pub fn prefetch(&self, cache: &QueryCache) -> Option<Ticket> {
        if self.fetching || self.error.is_some() || !self.pager().has_next {
            return None;
        }
        let next = self.request.next();
        if cache.is_fresh(&QueryKey::page(self.resource, next)) {
            return None;
        }
        Some(Ticket { request: next, generation: self.generation })
    }

    /// Cache a prefetched page unless the view moved on meanwhile
    pub fn accept_prefetch(
        &self,
        ticket: Ticket,
        result: Result<ListPage<T>, ApiError>,
        cache: &mut QueryCache,
    ) -> bool {
        let path = self.resource.path();
        if ticket.generation != self.generation {
            log::debug!("discarding prefetch of {} page {}", path, ticket.request.page);
            return false;
        }
        match result {
            Ok(rows) => {
                cache.store(QueryKey::page(self.resource, ticket.request), rows);
                true
            }
            Err(err) => {
                log::debug!("prefetch of {} page {} failed: {}", path, ticket.request.page, err);
                false
            }
        }
    }

    pub fn pager(&self) -> PagerState {
        match &self.page {
            Some(rows) => PagerState::for_server_page(
                self.request,
                rows.len(),
                rows.count,
                rows.has_next,
                self.placeholder,
            ),
            None => PagerState {
                page: self.request.page,
                has_previous: self.request.page > 1,
                has_next: false,
            },
        }
    }

    /// Page to move back to when the loaded page lies past the last one,
    /// e.g. after its only row was deleted or from a hand-edited URL.
    /// Uses the reported total when there is one, else steps back one page.
    pub fn fallback_page(&self) -> Option<u32> {
        let page = self.page.as_ref()?;
        if self.request.page <= 1 || self.fetching || self.placeholder || !page.is_empty() {
            return None;
        }
        let last = match page.count {
            Some(total) => page_count(total as usize, self.request.size) as u32,
            None => self.request.page - 1,
        };
        Some(last.clamp(1, self.request.page - 1))
    }

    pub fn rows(&self) -> &[T] {
        self.page.as_ref().map(|p| p.data.as_slice()).unwrap_or(&[])
    }

    /// Nothing to show yet
    pub fn is_pending(&self) -> bool {
        self.fetching && self.page.is_none()
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(ids: std::ops::Range<u32>) -> ListPage<u32> {
        ListPage::new(ids.collect())
    }

    #[test]
    fn test_first_show_fetches() {
        let mut cache = QueryCache::new();
        let mut list = PagedList::<u32>::new(Resource::Plans, 5);
        let ticket = list.show(1, &cache).unwrap();
        assert!(list.is_pending());

        assert!(list.resolve(ticket, Ok(page_of(0..5)), &mut cache));
        assert_eq!(list.rows().len(), 5);
        assert!(list.pager().has_next);
        assert!(!list.pager().has_previous);

        // Cached now: showing page 1 again needs no request
        assert!(list.show(1, &cache).is_none());
    }

    #[test]
    fn test_placeholder_while_next_page_loads() {
        let mut cache = QueryCache::new();
        let mut list = PagedList::<u32>::new(Resource::Plans, 5);
        let t1 = list.show(1, &cache).unwrap();
        list.resolve(t1, Ok(page_of(0..5)), &mut cache);

        let t2 = list.show(2, &cache).unwrap();
        assert!(list.is_placeholder());
        assert!(!list.is_pending());
        assert_eq!(list.rows(), &[0, 1, 2, 3, 4]);
        assert!(!list.pager().has_next);

        list.resolve(t2, Ok(page_of(5..7)), &mut cache);
        assert!(!list.is_placeholder());
        assert_eq!(list.rows(), &[5, 6]);
        assert!(!list.pager().has_next);
        assert!(list.pager().has_previous);
    }

    #[test]
    fn test_outdated_answer_is_cached_but_not_shown() {
        let mut cache = QueryCache::new();
        let mut list = PagedList::<u32>::new(Resource::Plans, 5);
        let t1 = list.show(1, &cache).unwrap();
        let t2 = list.show(2, &cache).unwrap();

        assert!(!list.resolve(t1, Ok(page_of(0..5)), &mut cache));
        assert!(list.rows().is_empty());
        assert!(cache.is_fresh(&QueryKey::page(Resource::Plans, PageRequest::new(1, 5))));

        assert!(list.resolve(t2, Ok(page_of(5..10)), &mut cache));
        assert_eq!(list.rows()[0], 5);
    }

    #[test]
    fn test_prefetch_discarded_after_page_change() {
        let mut cache = QueryCache::new();
        let mut list = PagedList::<u32>::new(Resource::Plans, 5);
        let t1 = list.show(1, &cache).unwrap();
        list.resolve(t1, Ok(page_of(0..5)), &mut cache);

        let prefetch = list.prefetch(&cache).unwrap();
        assert_eq!(prefetch.request.page, 2);

        list.show(3, &cache);
        assert!(!list.accept_prefetch(prefetch, Ok(page_of(5..10)), &mut cache));
        assert!(!cache.is_fresh(&QueryKey::page(Resource::Plans, PageRequest::new(2, 5))));
    }

    #[test]
    fn test_prefetch_serves_next_page_instantly() {
        let mut cache = QueryCache::new();
        let mut list = PagedList::<u32>::new(Resource::Plans, 5);
        let t1 = list.show(1, &cache).unwrap();
        list.resolve(t1, Ok(page_of(0..5)), &mut cache);

        let prefetch = list.prefetch(&cache).unwrap();
        assert!(list.accept_prefetch(prefetch, Ok(page_of(5..10)), &mut cache));
        // Prefetched rows are not on screen until the user advances
        assert_eq!(list.rows()[0], 0);
        assert!(list.prefetch(&cache).is_none());

        assert!(list.show(2, &cache).is_none());
        assert_eq!(list.rows()[0], 5);
    }

    #[test]
    fn test_empty_page_past_the_end_falls_back() {
        let mut cache = QueryCache::new();
        let mut list = PagedList::<u32>::new(Resource::Plans, 5);
        let t4 = list.show(4, &cache).unwrap();
        assert_eq!(list.fallback_page(), None);

        let mut empty = ListPage::new(Vec::new());
        empty.count = Some(7);
        list.resolve(t4, Ok(empty), &mut cache);
        assert_eq!(list.fallback_page(), Some(2));

        // Without a total, step back one page at a time
        let t3 = list.show(3, &cache).unwrap();
        list.resolve(t3, Ok(ListPage::new(Vec::new())), &mut cache);
        assert_eq!(list.fallback_page(), Some(2));

        let t2 = list.show(2, &cache).unwrap();
        list.resolve(t2, Ok(page_of(5..7)), &mut cache);
        assert_eq!(list.fallback_page(), None);
    }

    #[test]
    fn test_empty_first_page_stays() {
        let mut cache = QueryCache::new();
        let mut list = PagedList::<u32>::new(Resource::Plans, 5);
        let t1 = list.show(1, &cache).unwrap();
        list.resolve(t1, Ok(ListPage::new(Vec::new())), &mut cache);
        assert_eq!(list.fallback_page(), None);
    }

    #[test]
    fn test_error_suspends_paging() {
        let mut cache = QueryCache::new();
        let mut list = PagedList::<u32>::new(Resource::Plans, 5);
        let t1 = list.show(1, &cache).unwrap();
        list.resolve(t1, Err(ApiError::Network("offline".into())), &mut cache);
        assert!(list.error().is_some());
        assert!(list.prefetch(&cache).is_none());
        assert!(!list.pager().has_next);
    }

    #[test]
    fn test_invalidation_refetches_but_keeps_rows() {
        let mut cache = QueryCache::new();
        let mut list = PagedList::<u32>::new(Resource::Plans, 5);
        let t1 = list.show(1, &cache).unwrap();
        list.resolve(t1, Ok(page_of(0..3)), &mut cache);

        cache.invalidate(Resource::Plans);
        let ticket = list.refresh(&cache).unwrap();
        assert_eq!(list.rows().len(), 3);
        assert!(!list.is_pending());
        list.resolve(ticket, Ok(page_of(0..4)), &mut cache);
        assert_eq!(list.rows().len(), 4);
    }
}
