//! Domain Layer - Core Entity Trait
//!
//! Every record listed by the console has a backend identifier and lives
//! under one REST resource.

use serde::{Deserialize, Deserializer};

/// Core trait for all records returned by the backend
pub trait Entity: Clone + Send + Sync + 'static {
    /// Resource the record is listed under
    const RESOURCE: Resource;

    /// Returns the record's backend identifier
    fn id(&self) -> &str;
}

/// REST resources managed by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Plans,
    Quotes,
    Items,
    Users,
}

impl Resource {
    pub const ALL: [Resource; 4] =
        [Resource::Plans, Resource::Quotes, Resource::Items, Resource::Users];

    /// Path segment of the resource, both on the backend and in the address bar
    pub fn path(self) -> &'static str {
        match self {
            Resource::Plans => "plans",
            Resource::Quotes => "quotes",
            Resource::Items => "items",
            Resource::Users => "users",
        }
    }

    /// Heading shown above the resource's screen
    pub fn title(self) -> &'static str {
        match self {
            Resource::Plans => "Plans Management",
            Resource::Quotes => "Quotes Management",
            Resource::Items => "Items Management",
            Resource::Users => "Users Management",
        }
    }

    /// Resolve a browser pathname such as `/quotes` or `/users/`.
    /// Unknown paths land on the plans screen.
    pub fn from_path(path: &str) -> Self {
        let segment = path.trim_matches('/').split('/').next_back().unwrap_or_default();
        Resource::ALL
            .into_iter()
            .find(|r| r.path().eq_ignore_ascii_case(segment))
            .unwrap_or(Resource::Plans)
    }
}

/// Identifiers come back as UUID strings for most resources, but quote
/// payloads have been seen with integer ids.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(n) => n.to_string(),
    })
}
