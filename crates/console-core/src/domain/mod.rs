//! Domain Layer
//!
//! Records served by the backend and the shapes used to create/update them.
//! Nothing here talks to the network.

mod entity;
mod item;
mod page;
mod plan;
mod quote;
mod record;
mod user;

pub use entity::{Entity, Resource};
pub use item::{Item, ItemCreate, ItemUpdate};
pub use page::ListPage;
pub use plan::{Plan, PlanCreate, PlanUpdate};
pub use quote::{Coverage, DetailRequest, Quotation, Quote, QuoteBody};
pub use record::{Cell, Record, RecordKind};
pub use user::{User, UserCreate, UserUpdate};
