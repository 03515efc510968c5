//! Toast Stack Component

use console_core::NoticeLevel;
use leptos::prelude::*;

use crate::store::{store_dismiss_toast, use_app_store, ConsoleStateStoreFields};

#[component]
pub fn ToastStack() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-stack">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.notice.level {
                        NoticeLevel::Success => "toast toast-success",
                        NoticeLevel::Error => "toast toast-error",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class role="status">
                            <strong class="toast-title">{toast.notice.title}</strong>
                            <p class="toast-message">{toast.notice.message}</p>
                            <button class="toast-close" on:click=move |_| store_dismiss_toast(&store, id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
