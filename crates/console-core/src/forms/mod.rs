//! Form-state binding for the add/edit modals.

mod schema;
mod settle;
mod state;

pub use settle::settle;
pub use state::{FieldKind, FieldSpec, FieldValue, FormState, FormTarget};
