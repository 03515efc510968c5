//! Insurance Admin Console App
//!
//! Sidebar navigation plus one screen per resource.

use console_core::domain::{RecordKind, Resource};
use console_core::ConsoleConfig;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{AddRecordButton, QuotesTable, RecordTable, Sidebar, ToastStack};
use crate::context::AppContext;
use crate::router;
use crate::store::ConsoleState;

#[component]
pub fn App(config: ConsoleConfig) -> impl IntoView {
    let store = Store::new(ConsoleState::default());
    let ctx = AppContext::new(config, store);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Back/forward buttons
    let _popstate = window_event_listener(leptos::ev::popstate, move |_| {
        ctx.route.set(router::current());
    });

    // Only a change of screen rebuilds it; page changes are handled inside
    let screen = Memo::new(move |_| ctx.route.with(|r| r.resource));

    view! {
        <div class="app-layout">
            <Sidebar />

            <main class="main-content">
                <h1>{move || screen.get().title()}</h1>

                {move || match screen.get() {
                    Resource::Quotes => view! { <QuotesTable /> }.into_any(),
                    resource => {
                        let kind = RecordKind::from_resource(resource).unwrap_or(RecordKind::Plan);
                        view! {
                            <AddRecordButton kind=kind />
                            <RecordTable kind=kind />
                        }.into_any()
                    }
                }}
            </main>

            <ToastStack />
        </div>
    }
}
