//! Editable records.
//!
//! Plans, items and users share one table layout and one action menu, so
//! they are carried around as a single tagged [`Record`].

use serde_json::Value;

use super::entity::{Entity, Resource};
use super::item::Item;
use super::plan::Plan;
use super::user::User;

/// Kind of an editable record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Plan,
    Item,
    User,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Plan => "Plan",
            RecordKind::Item => "Item",
            RecordKind::User => "User",
        }
    }

    pub fn resource(self) -> Resource {
        match self {
            RecordKind::Plan => Plan::RESOURCE,
            RecordKind::Item => Item::RESOURCE,
            RecordKind::User => User::RESOURCE,
        }
    }

    /// Quotes are read-only and have no record kind
    pub fn from_resource(resource: Resource) -> Option<Self> {
        match resource {
            Resource::Plans => Some(RecordKind::Plan),
            Resource::Items => Some(RecordKind::Item),
            Resource::Users => Some(RecordKind::User),
            Resource::Quotes => None,
        }
    }

    /// Table headings, without the trailing actions column
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            RecordKind::Plan => &["ID", "Name", "Description"],
            RecordKind::Item => &["ID", "Title", "Description"],
            RecordKind::User => &["Full name", "Email", "Role", "Status"],
        }
    }

    /// Decode one backend row of this kind
    pub fn decode(self, value: Value) -> Result<Record, serde_json::Error> {
        Ok(match self {
            RecordKind::Plan => Record::Plan(serde_json::from_value(value)?),
            RecordKind::Item => Record::Item(serde_json::from_value(value)?),
            RecordKind::User => Record::User(serde_json::from_value(value)?),
        })
    }
}

/// One rendered table cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub text: String,
    /// Placeholder text such as "N/A", rendered dimmed
    pub muted: bool,
}

impl Cell {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), muted: false }
    }

    pub(crate) fn optional(text: Option<&str>) -> Self {
        match text.filter(|t| !t.is_empty()) {
            Some(t) => Cell::text(t),
            None => Self { text: "N/A".to_string(), muted: true },
        }
    }
}

/// A plan, item or user row
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Plan(Plan),
    Item(Item),
    User(User),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Plan(_) => RecordKind::Plan,
            Record::Item(_) => RecordKind::Item,
            Record::User(_) => RecordKind::User,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::Plan(p) => p.id(),
            Record::Item(i) => i.id(),
            Record::User(u) => u.id(),
        }
    }

    /// Human name used in confirmation prompts
    pub fn display_name(&self) -> &str {
        match self {
            Record::Plan(p) => &p.name,
            Record::Item(i) => &i.title,
            Record::User(u) => u.full_name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&u.email),
        }
    }

    /// Cells in the order of [`RecordKind::columns`]
    pub fn cells(&self) -> Vec<Cell> {
        match self {
            Record::Plan(p) => vec![
                Cell::text(&p.id),
                Cell::text(&p.name),
                Cell::optional(p.description.as_deref()),
            ],
            Record::Item(i) => vec![
                Cell::text(&i.id),
                Cell::text(&i.title),
                Cell::optional(i.description.as_deref()),
            ],
            Record::User(u) => vec![
                Cell::optional(u.full_name.as_deref()),
                Cell::text(&u.email),
                Cell::text(if u.is_superuser { "Superuser" } else { "User" }),
                Cell::text(if u.is_active { "Active" } else { "Inactive" }),
            ],
        }
    }
}

impl From<Plan> for Record {
    fn from(plan: Plan) -> Self {
        Record::Plan(plan)
    }
}

impl From<Item> for Record {
    fn from(item: Item) -> Self {
        Record::Item(item)
    }
}

impl From<User> for Record {
    fn from(user: User) -> Self {
        Record::User(user)
    }
}
