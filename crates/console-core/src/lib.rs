//! Console Core
//!
//! Everything the insurance admin console does that doesn't need a DOM:
//! backend records and calls, the query cache, list paging, the quotes
//! search/sort pipeline and the add/edit form state.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod forms;
pub mod notice;
pub mod query;

pub use config::{ConfigError, ConsoleConfig};
pub use error::{ApiError, ApiResult, FieldError};
pub use notice::{Notice, NoticeLevel};
