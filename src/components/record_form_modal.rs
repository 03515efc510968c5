//! Record Form Modal
//!
//! Add/edit dialog for plans, items and users. The form stays open with its
//! values on failure; one write is in flight at most.

use console_core::forms::{FieldKind, FieldSpec, FormState};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

#[component]
pub fn RecordFormModal(form: RwSignal<FormState>, open: RwSignal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let fields = form.with_untracked(|f| f.fields().to_vec());

    let close = move || {
        let mut dismissed = false;
        form.update(|f| dismissed = f.dismiss());
        if dismissed {
            open.set(false);
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut mutation = None;
        form.update(|f| mutation = f.begin_submit());
        let Some(mutation) = mutation else { return };

        spawn_local(async move {
            let result = ctx.client().execute(&mutation).await;
            form.update(|f| f.finish(&result));
            ctx.settle(&mutation, &result);
            if result.is_ok() {
                open.set(false);
            }
        });
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-overlay" on:click=move |_| close()>
                <form
                    class="modal"
                    on:click=|ev| ev.stop_propagation()
                    on:submit=on_submit
                >
                    <h2 class="modal-title">{move || form.with(|f| f.title())}</h2>
                    <div class="modal-body">
                        {fields.iter().map(|spec| view! { <FormField form=form spec=*spec /> }).collect_view()}
                    </div>
                    <div class="modal-footer">
                        <button
                            type="submit"
                            class="primary-btn"
                            disabled=move || !form.with(|f| f.can_submit())
                        >
                            {move || if form.with(|f| f.is_submitting()) { "Saving..." } else { "Save" }}
                        </button>
                        <button
                            type="button"
                            class="cancel-btn"
                            disabled=move || form.with(|f| f.is_submitting())
                            on:click=move |_| close()
                        >
                            "Cancel"
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[component]
fn FormField(form: RwSignal<FormState>, spec: FieldSpec) -> impl IntoView {
    let name = spec.name;
    let error = move || form.with(|f| f.error(name).map(str::to_string));

    match spec.kind {
        FieldKind::Checkbox => view! {
            <label class="form-check">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.flag(name))
                    on:change=move |ev| form.update(|f| f.set_flag(name, event_target_checked(&ev)))
                />
                {spec.label}
            </label>
        }
        .into_any(),
        kind => {
            let input_type = match kind {
                FieldKind::Email => "email",
                FieldKind::Password => "password",
                _ => "text",
            };
            view! {
                <div class="form-control" class:invalid=move || error().is_some()>
                    <label for=name>{spec.label} {spec.required.then_some(" *")}</label>
                    <input
                        id=name
                        type=input_type
                        placeholder=spec.label
                        prop:value=move || form.with(|f| f.text(name).to_string())
                        on:input=move |ev| form.update(|f| f.set_text(name, event_target_value(&ev)))
                        on:blur=move |_| form.update(|f| f.blur(name))
                    />
                    {move || error().map(|message| view! { <p class="form-error">{message}</p> })}
                </div>
            }
            .into_any()
        }
    }
}
