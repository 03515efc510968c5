//! Write operations, one per record kind and verb.

use crate::domain::{
    ItemCreate, ItemUpdate, PlanCreate, PlanUpdate, RecordKind, Resource, UserCreate, UserUpdate,
};
use crate::error::ApiResult;

use super::transport::{HttpRequest, Method};

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreatePlan(PlanCreate),
    UpdatePlan { id: String, body: PlanUpdate },
    CreateItem(ItemCreate),
    UpdateItem { id: String, body: ItemUpdate },
    CreateUser(UserCreate),
    UpdateUser { id: String, body: UserUpdate },
    Delete { kind: RecordKind, id: String },
}

impl Mutation {
    pub fn kind(&self) -> RecordKind {
        match self {
            Mutation::CreatePlan(_) | Mutation::UpdatePlan { .. } => RecordKind::Plan,
            Mutation::CreateItem(_) | Mutation::UpdateItem { .. } => RecordKind::Item,
            Mutation::CreateUser(_) | Mutation::UpdateUser { .. } => RecordKind::User,
            Mutation::Delete { kind, .. } => *kind,
        }
    }

    /// Resource whose cached lists go stale once this succeeds
    pub fn resource(&self) -> Resource {
        self.kind().resource()
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Mutation::Delete { .. })
    }

    pub fn success_message(&self) -> String {
        let label = self.kind().label();
        match self {
            Mutation::CreatePlan(_) | Mutation::CreateItem(_) | Mutation::CreateUser(_) => {
                format!("{label} created successfully.")
            }
            Mutation::Delete { .. } => {
                format!("The {} was deleted successfully.", label.to_lowercase())
            }
            _ => format!("{label} updated successfully."),
        }
    }

    pub(crate) fn to_request(&self) -> ApiResult<HttpRequest> {
        let base = format!("/{}/", self.resource().path());
        let with_id = |id: &str| format!("/{}/{}", self.resource().path(), id);
        Ok(match self {
            Mutation::CreatePlan(body) => {
                HttpRequest::new(Method::Post, base).json(serde_json::to_string(body)?)
            }
            Mutation::CreateItem(body) => {
                HttpRequest::new(Method::Post, base).json(serde_json::to_string(body)?)
            }
            Mutation::CreateUser(body) => {
                HttpRequest::new(Method::Post, base).json(serde_json::to_string(body)?)
            }
            Mutation::UpdatePlan { id, body } => {
                HttpRequest::new(Method::Put, with_id(id)).json(serde_json::to_string(body)?)
            }
            Mutation::UpdateItem { id, body } => {
                HttpRequest::new(Method::Put, with_id(id)).json(serde_json::to_string(body)?)
            }
            // The users endpoint only accepts partial updates
            Mutation::UpdateUser { id, body } => {
                HttpRequest::new(Method::Patch, with_id(id)).json(serde_json::to_string(body)?)
            }
            Mutation::Delete { id, .. } => HttpRequest::new(Method::Delete, with_id(id)),
        })
    }
}
