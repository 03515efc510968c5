//! Delete Confirm Button Component
//!
//! Inline delete with a confirm/cancel step. The row is only removed by the
//! refetch that follows a successful delete.

use console_core::api::Mutation;
use console_core::domain::Record;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

/// Shows "Delete Plan" initially. When clicked, asks for confirmation with ✓/✗.
#[component]
pub fn DeleteConfirmButton(record: Record) -> impl IntoView {
    let ctx = use_app_context();
    let (confirm_delete, set_confirm_delete) = signal(false);
    let (deleting, set_deleting) = signal(false);

    let kind = record.kind();
    let id = StoredValue::new(record.id().to_string());
    let name = record.display_name().to_string();

    let on_confirm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if deleting.get_untracked() {
            return;
        }
        set_deleting.set(true);
        let mutation = Mutation::Delete { kind, id: id.get_value() };
        spawn_local(async move {
            let result = ctx.client().execute(&mutation).await;
            set_deleting.set(false);
            if result.is_ok() {
                set_confirm_delete.set(false);
            }
            ctx.settle(&mutation, &result);
        });
    };

    view! {
        <Show when=move || !confirm_delete.get()>
            <button
                class="menu-item danger"
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirm_delete.set(true);
                }
            >
                "Delete " {kind.label()}
            </button>
        </Show>
        <Show when=move || confirm_delete.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">
                    "Delete " {name.clone()} "? This cannot be undone."
                </span>
                <button class="confirm-btn" disabled=move || deleting.get() on:click=on_confirm>
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    disabled=move || deleting.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
