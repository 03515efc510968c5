//! Sidebar Component
//!
//! One link per screen; clicks stay in the app.

use console_core::domain::Resource;
use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="sidebar">
            <div class="sidebar-brand">"Insurance Console"</div>
            <ul class="sidebar-links">
                {Resource::ALL
                    .into_iter()
                    .map(|resource| {
                        let label = match resource {
                            Resource::Plans => "Plans",
                            Resource::Quotes => "Quotes",
                            Resource::Items => "Items",
                            Resource::Users => "Users",
                        };
                        view! {
                            <li>
                                <a
                                    href=format!("/{}", resource.path())
                                    class:active=move || ctx.route.with(|r| r.resource == resource)
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        ctx.open(resource);
                                    }
                                >
                                    {label}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
