//! Pagination Controls

use console_core::query::PagerState;
use leptos::prelude::*;

/// Previous / "Page N" / Next
#[component]
pub fn Pager(
    #[prop(into)] state: Signal<PagerState>,
    #[prop(into)] on_page: Callback<u32>,
) -> impl IntoView {
    view! {
        <div class="pager">
            <button
                class="pager-btn"
                disabled=move || !state.get().has_previous
                on:click=move |_| {
                    let page = state.get_untracked().page;
                    if page > 1 {
                        on_page.run(page - 1);
                    }
                }
            >
                "Previous"
            </button>
            <span class="pager-page">"Page " {move || state.get().page}</span>
            <button
                class="pager-btn"
                disabled=move || !state.get().has_next
                on:click=move |_| on_page.run(state.get_untracked().page + 1)
            >
                "Next"
            </button>
        </div>
    }
}
