//! Row Actions Menu
//!
//! Edit and delete for one plan, item or user.

use console_core::domain::Record;
use console_core::forms::FormState;
use leptos::prelude::*;

use crate::components::{DeleteConfirmButton, RecordFormModal};

#[component]
pub fn ActionsMenu(record: Record) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let editing = RwSignal::new(false);
    let form = RwSignal::new(FormState::edit(&record));
    let label = record.kind().label();

    view! {
        <div class="actions-menu">
            <button
                class="menu-toggle"
                title="Actions"
                on:click=move |_| set_menu_open.update(|open| *open = !*open)
            >
                "⋮"
            </button>
            <Show when=move || menu_open.get()>
                <div class="menu-list">
                    <button
                        class="menu-item"
                        on:click=move |_| {
                            set_menu_open.set(false);
                            editing.set(true);
                        }
                    >
                        "Edit " {label}
                    </button>
                    <DeleteConfirmButton record=record.clone() />
                </div>
            </Show>
            <RecordFormModal form=form open=editing />
        </div>
    }
}
