//! Record Table Component
//!
//! Server-paginated table of plans, items or users, backed by the query cache.

use console_core::domain::{ListPage, Record, RecordKind};
use console_core::query::{PagedList, QueryCache, Ticket};
use console_core::ApiResult;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ActionsMenu, Pager, SkeletonRows};
use crate::context::{use_app_context, AppContext};

#[component]
pub fn RecordTable(kind: RecordKind) -> impl IntoView {
    let ctx = use_app_context();
    let list = RwSignal::new(PagedList::<Record>::new(kind.resource(), ctx.page_size()));

    // Show the page in the URL; writes elsewhere re-run this through `invalidated`
    Effect::new(move |_| {
        let route = ctx.route.get();
        let _ = ctx.invalidated.get();
        if route.resource != kind.resource() {
            return;
        }
        let page = route.page;

        let mut ticket = None;
        ctx.cache.with_value(|cache| list.update(|l| ticket = l.show(page, cache)));
        if let Some(ticket) = ticket {
            fetch_page(ctx, list, kind, ticket);
        }
    });

    // Warm the cache with the following page once it is known to exist
    Effect::new(move |_| {
        let mut ticket = None;
        list.with(|l| ctx.cache.with_value(|cache| ticket = l.prefetch(cache)));
        let Some(ticket) = ticket else { return };

        spawn_local(async move {
            let result = ctx.client().list_records(kind, ticket.request).await;
            if !store_prefetch(ctx.cache, list, ticket, result) {
                log::debug!("dropped prefetch of {} page {}", kind.label(), ticket.request.page);
            }
        });
    });

    // A page past the end (last row deleted, edited URL) moves back
    Effect::new(move |_| {
        if let Some(page) = list.with(|l| l.fallback_page()) {
            let empty = list.with_untracked(|l| l.request().page);
            log::info!("{} page {} is empty, showing page {}", kind.label(), empty, page);
            ctx.go_to_page(page);
        }
    });

    let columns = kind.columns();
    let page_size = ctx.page_size();

    view! {
        <Show
            when=move || list.with(|l| l.error().is_none())
            fallback=move || view! {
                <p class="list-error">
                    "Error: " {move || list.with(|l| l.error().map(|e| e.user_message()).unwrap_or_default())}
                </p>
            }
        >
            <table class="data-table">
                <thead>
                    <tr>
                        {columns.iter().map(|c| view! { <th>{*c}</th> }).collect_view()}
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody class:placeholder=move || list.with(|l| l.is_placeholder())>
                    {move || if list.with(|l| l.is_pending()) {
                        view! { <SkeletonRows rows=page_size columns=columns.len() + 1 /> }.into_any()
                    } else {
                        view! {
                            <For
                                each=move || list.with(|l| l.rows().to_vec())
                                key=|record| (record.id().to_string(), record.cells())
                                children=move |record| view! { <RecordRow record=record /> }
                            />
                        }.into_any()
                    }}
                </tbody>
            </table>
            <Show when=move || list.with(|l| !l.is_pending() && l.rows().is_empty())>
                <p class="list-empty">"No " {kind.resource().path()} " yet."</p>
            </Show>
            <Pager
                state=Signal::derive(move || list.with(|l| l.pager()))
                on_page=Callback::new(move |page: u32| ctx.go_to_page(page))
            />
        </Show>
    }
}

fn fetch_page(
    ctx: AppContext,
    list: RwSignal<PagedList<Record>>,
    kind: RecordKind,
    ticket: Ticket,
) {
    spawn_local(async move {
        let result = ctx.client().list_records(kind, ticket.request).await;
        let mut applied = false;
        ctx.cache.update_value(|cache| {
            applied = list.try_update(|l| l.resolve(ticket, result, cache)).unwrap_or(false);
        });
        if !applied {
            let page = ticket.request.page;
            log::debug!("{} page {} arrived after the view moved on", kind.label(), page);
        }
    });
}

/// Cache a prefetched page. Closing the screen disposes `list`; a prefetch
/// landing after that is dropped.
fn store_prefetch(
    cache: StoredValue<QueryCache>,
    list: RwSignal<PagedList<Record>>,
    ticket: Ticket,
    result: ApiResult<ListPage<Record>>,
) -> bool {
    let mut stored = false;
    cache.update_value(|cache| {
        stored = list
            .try_with_untracked(|l| l.accept_prefetch(ticket, result, cache))
            .unwrap_or(false);
    });
    stored
}

#[component]
fn RecordRow(record: Record) -> impl IntoView {
    let cells = record.cells();

    view! {
        <tr>
            {cells
                .into_iter()
                .map(|cell| view! { <td class:muted=cell.muted>{cell.text}</td> })
                .collect_view()}
            <td class="row-actions">
                <ActionsMenu record=record />
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::domain::{Plan, Resource};
    use console_core::query::{PageRequest, QueryKey};

    fn plan(id: &str) -> Record {
        Record::Plan(Plan {
            id: id.to_string(),
            name: format!("Plan {id}"),
            description: None,
            active: true,
        })
    }

    /// List showing page 1 with a next page to prefetch
    fn loaded_list(cache: StoredValue<QueryCache>) -> (PagedList<Record>, Ticket) {
        let mut list = PagedList::new(Resource::Plans, 2);
        cache.update_value(|cache| {
            let first = list.show(1, cache).expect("empty cache fetches");
            list.resolve(first, Ok(ListPage::new(vec![plan("a"), plan("b")])), cache);
        });
        let next = cache
            .with_value(|cache| list.prefetch(cache))
            .expect("a full page has a next one");
        (list, next)
    }

    fn next_key() -> QueryKey {
        QueryKey::page(Resource::Plans, PageRequest::new(2, 2))
    }

    #[test]
    fn test_prefetch_is_cached_while_screen_is_open() {
        let cache = StoredValue::new(QueryCache::new());
        let screen = Owner::new();
        let (list, ticket) = screen.with(|| {
            let (list, ticket) = loaded_list(cache);
            (RwSignal::new(list), ticket)
        });

        assert!(store_prefetch(cache, list, ticket, Ok(ListPage::new(vec![plan("c")]))));
        assert!(cache.with_value(|cache| cache.is_fresh(&next_key())));
    }

    #[test]
    fn test_prefetch_after_screen_closed_is_dropped() {
        let cache = StoredValue::new(QueryCache::new());
        let screen = Owner::new();
        let (list, ticket) = screen.with(|| {
            let (list, ticket) = loaded_list(cache);
            (RwSignal::new(list), ticket)
        });
        screen.cleanup();

        assert!(!store_prefetch(cache, list, ticket, Ok(ListPage::new(vec![plan("c")]))));
        assert!(!cache.with_value(|cache| cache.is_fresh(&next_key())));
    }
}
