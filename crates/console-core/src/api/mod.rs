//! API Client Facade
//!
//! Typed calls against the REST backend. The HTTP exchange itself sits
//! behind [`Transport`] so the same client runs on the browser's `fetch`
//! and on the in-memory backend the tests use.

mod client;
mod mutation;
mod transport;

#[cfg(test)]
pub(crate) mod memory;

pub use client::ApiClient;
pub use mutation::Mutation;
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
