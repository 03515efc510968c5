//! List responses.
//!
//! Older list endpoints answer with a bare JSON array, newer ones with a
//! `{data, count}` envelope; the quotes endpoint may also report
//! `hasNextPage`. All of them decode into [`ListPage`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub data: Vec<T>,
    /// Total number of records on the backend, when reported
    pub count: Option<u64>,
    /// Backend's own verdict on whether another page exists
    pub has_next: Option<bool>,
}

impl<T> ListPage<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data, count: None, has_next: None }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Wire<T> {
    Bare(Vec<T>),
    Envelope {
        data: Vec<T>,
        #[serde(default)]
        count: Option<u64>,
        #[serde(default, rename = "hasNextPage")]
        has_next: Option<bool>,
    },
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ListPage<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Wire::deserialize(deserializer)? {
            Wire::Bare(data) => ListPage::new(data),
            Wire::Envelope { data, count, has_next } => ListPage { data, count, has_next },
        })
    }
}
