//! Application Context
//!
//! Shared services provided via Leptos Context API.

use console_core::api::Mutation;
use console_core::domain::{Record, Resource};
use console_core::forms::settle;
use console_core::query::QueryCache;
use console_core::{ApiResult, ConsoleConfig, Notice};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::backend::{Client, FetchTransport};
use crate::router::{self, Route};
use crate::store::{store_dismiss_toast, store_push_toast, AppStore};

/// App-wide services and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    client: StoredValue<Client>,
    /// Query cache shared by every screen
    pub cache: StoredValue<QueryCache>,
    config: StoredValue<ConsoleConfig>,
    /// Bumped after each successful write - read
    pub invalidated: ReadSignal<u32>,
    /// Bumped after each successful write - write
    set_invalidated: WriteSignal<u32>,
    /// Current screen and page
    pub route: RwSignal<Route>,
    store: AppStore,
}

impl AppContext {
    pub fn new(config: ConsoleConfig, store: AppStore) -> Self {
        let (invalidated, set_invalidated) = signal(0u32);
        Self {
            client: StoredValue::new(Client::new(FetchTransport::new(config.api_base.clone()))),
            cache: StoredValue::new(QueryCache::new()),
            config: StoredValue::new(config),
            invalidated,
            set_invalidated,
            route: RwSignal::new(router::current()),
            store,
        }
    }

    pub fn client(&self) -> Client {
        self.client.get_value()
    }

    pub fn page_size(&self) -> usize {
        self.config.with_value(|c| c.page_size)
    }

    pub fn quote_batch_size(&self) -> usize {
        self.config.with_value(|c| c.quote_batch_size)
    }

    /// Move to another page of the current screen
    pub fn go_to_page(&self, page: u32) {
        let route = Route { page, ..self.route.get_untracked() };
        if route != self.route.get_untracked() {
            router::push(route);
            self.route.set(route);
        }
    }

    /// Open another screen at its first page
    pub fn open(&self, resource: Resource) {
        let route = Route { resource, page: 1 };
        router::push(route);
        self.route.set(route);
    }

    /// Show a toast that goes away on its own
    pub fn notify(&self, notice: Notice) {
        let store = self.store;
        let id = store_push_toast(&store, notice);
        let delay = self.config.with_value(|c| c.toast_ms);
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            store_dismiss_toast(&store, id);
        });
    }

    /// Settle a finished write: invalidate on success, then toast the outcome
    pub fn settle(&self, mutation: &Mutation, result: &ApiResult<Option<Record>>) {
        let mut notice = None;
        self.cache.update_value(|cache| notice = Some(settle(cache, mutation, result)));
        if result.is_ok() {
            self.set_invalidated.update(|v| *v += 1);
        }
        if let Some(notice) = notice {
            self.notify(notice);
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
