//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use console_core::Notice;
use leptos::prelude::*;
use reactive_stores::Store;

/// A notice currently on screen
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Clone, Debug, Default, Store)]
pub struct ConsoleState {
    /// Toasts, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
}

pub type AppStore = Store<ConsoleState>;

pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Queue a toast and return its id
pub fn store_push_toast(store: &AppStore, notice: Notice) -> u64 {
    let id = *store.next_toast_id().read_untracked();
    *store.next_toast_id().write() = id + 1;
    store.toasts().write().push(Toast { id, notice });
    id
}

pub fn store_dismiss_toast(store: &AppStore, id: u64) {
    store.toasts().write().retain(|toast| toast.id != id);
}
