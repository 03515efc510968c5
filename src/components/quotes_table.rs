//! Quotes Table Component
//!
//! Loads every quote once, then searches, sorts and pages in the browser so
//! each screen reflects the whole set, not one backend page.

use console_core::domain::{Quote, Resource};
use console_core::query::{compose, quote_cells, QueryKey, QuoteView, SortColumn, QUOTE_COLUMNS};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{Pager, SkeletonRows};
use crate::context::use_app_context;

const SORTABLE: [SortColumn; 3] = [SortColumn::Id, SortColumn::Amount, SortColumn::Date];

#[component]
pub fn QuotesTable() -> impl IntoView {
    let ctx = use_app_context();
    let (quotes, set_quotes) = signal(None::<Vec<Quote>>);
    let (error, set_error) = signal(None::<String>);
    let view_state = RwSignal::new(QuoteView::default());
    let page_size = ctx.page_size();

    Effect::new(move |_| {
        let _ = ctx.invalidated.get();
        let key = QueryKey::all(Resource::Quotes);
        let lookup = ctx.cache.with_value(|cache| cache.lookup::<Vec<Quote>>(&key));
        let needs_fetch = lookup.needs_fetch();
        if let Some(rows) = lookup.value() {
            set_quotes.set(Some(rows));
        }
        if !needs_fetch {
            return;
        }

        let batch = ctx.quote_batch_size();
        spawn_local(async move {
            match ctx.client().list_all_quotes(batch).await {
                Ok(rows) => {
                    log::info!("loaded {} quotes", rows.len());
                    ctx.cache.update_value(|cache| cache.store(key, rows.clone()));
                    set_error.set(None);
                    set_quotes.set(Some(rows));
                }
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    });

    // One snapshot per render: filter, then sort, then the page from the URL
    let composed = Memo::new(move |_| {
        let page = ctx.route.with(|r| r.page);
        quotes.with(|quotes| {
            quotes.as_ref().map(|quotes| {
                let view = QuoteView { page, ..view_state.get() };
                compose(quotes, &view, page_size)
            })
        })
    });

    let sort_by = move |column: SortColumn| {
        view_state.update(|v| v.sort_by(column));
        ctx.go_to_page(1);
    };

    view! {
        <div class="table-toolbar">
            <input
                class="search-input"
                type="search"
                placeholder="Search by branch"
                prop:value=move || view_state.with(|v| v.search.clone())
                on:input=move |ev| {
                    view_state.update(|v| v.set_search(event_target_value(&ev)));
                    ctx.go_to_page(1);
                }
            />
        </div>

        <Show
            when=move || error.with(Option::is_none)
            fallback=move || view! {
                <p class="list-error">"Error: " {move || error.get().unwrap_or_default()}</p>
            }
        >
            <table class="data-table">
                <thead>
                    <tr>
                        {SORTABLE
                            .into_iter()
                            .map(|column| view! {
                                <th class="sortable" on:click=move |_| sort_by(column)>
                                    {column.label()}
                                    {move || view_state.with(|v| v.sort.indicator(column))}
                                </th>
                            })
                            .collect_view()}
                        {QUOTE_COLUMNS[SORTABLE.len()..]
                            .iter()
                            .map(|c| view! { <th>{*c}</th> })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || match composed.get() {
                        None => view! {
                            <SkeletonRows rows=page_size columns=QUOTE_COLUMNS.len() />
                        }.into_any(),
                        Some(page) => page
                            .rows
                            .iter()
                            .map(|quote| view! { <QuoteRow quote=quote.clone() /> })
                            .collect_view()
                            .into_any(),
                    }}
                </tbody>
            </table>
            <Show when=move || composed.with(|p| p.as_ref().is_some_and(|p| p.matched == 0))>
                <p class="list-empty">"No quotes match."</p>
            </Show>
            <Pager
                state=Signal::derive(move || {
                    composed.with(|p| p.as_ref().map(|p| p.pager).unwrap_or_default())
                })
                on_page=Callback::new(move |page: u32| ctx.go_to_page(page))
            />
        </Show>
    }
}

#[component]
fn QuoteRow(quote: Quote) -> impl IntoView {
    view! {
        <tr>
            {quote_cells(&quote)
                .into_iter()
                .map(|cell| view! { <td class:muted=cell.muted>{cell.text}</td> })
                .collect_view()}
        </tr>
    }
}
