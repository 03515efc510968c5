//! Query cache.
//!
//! Results are keyed by (resource, parameters). Entries stay fresh until a
//! write to their resource invalidates them; a stale entry can still be
//! shown while its refetch is in flight.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::Resource;

use super::pagination::PageRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryParams {
    /// One backend page
    Page(PageRequest),
    /// The complete result set
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Resource,
    pub params: QueryParams,
}

impl QueryKey {
    pub fn page(resource: Resource, request: PageRequest) -> Self {
        Self { resource, params: QueryParams::Page(request) }
    }

    pub fn all(resource: Resource) -> Self {
        Self { resource, params: QueryParams::All }
    }
}

/// Result of reading the cache
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Fresh(T),
    /// Invalidated; usable for display but must be refetched
    Stale(T),
    Missing,
}

impl<T> Lookup<T> {
    pub fn needs_fetch(&self) -> bool {
        !matches!(self, Lookup::Fresh(_))
    }

    pub fn value(self) -> Option<T> {
        match self {
            Lookup::Fresh(v) | Lookup::Stale(v) => Some(v),
            Lookup::Missing => None,
        }
    }
}

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    stale: bool,
}

#[derive(Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache").field("entries", &self.entries.len()).finish()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup<T: Clone + 'static>(&self, key: &QueryKey) -> Lookup<T> {
        let Some(entry) = self.entries.get(key) else {
            return Lookup::Missing;
        };
        match entry.value.downcast_ref::<T>() {
            Some(value) if entry.stale => Lookup::Stale(value.clone()),
            Some(value) => Lookup::Fresh(value.clone()),
            None => {
                log::warn!("cache entry {:?} holds a different type", key);
                Lookup::Missing
            }
        }
    }

    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|e| !e.stale)
    }

    pub fn store<T: Send + Sync + 'static>(&mut self, key: QueryKey, value: T) {
        log::debug!("cache store {:?}", key);
        self.entries.insert(key, CacheEntry { value: Arc::new(value), stale: false });
    }

    /// Mark every entry of `resource` stale; returns how many were marked
    pub fn invalidate(&mut self, resource: Resource) -> usize {
        let mut marked = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.resource == resource && !entry.stale {
                entry.stale = true;
                marked += 1;
            }
        }
        log::info!("invalidated {} cached {} queries", marked, resource.path());
        marked
    }
}
