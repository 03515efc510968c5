use console_core::domain::RecordKind;
use console_core::forms::FormState;
use leptos::prelude::*;

use crate::components::RecordFormModal;

/// "Add Plan" style button above a table, with its create form
#[component]
pub fn AddRecordButton(kind: RecordKind) -> impl IntoView {
    let form = RwSignal::new(FormState::create(kind));
    let open = RwSignal::new(false);

    view! {
        <div class="table-toolbar">
            <button class="primary-btn" on:click=move |_| open.set(true)>
                "+ Add " {kind.label()}
            </button>
        </div>
        <RecordFormModal form=form open=open />
    }
}
