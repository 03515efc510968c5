//! Plan records (insurance products).

use serde::{Deserialize, Serialize};

use super::entity::{string_or_number, Entity, Resource};

/// Plan as returned by `GET /plans/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

impl Entity for Plan {
    const RESOURCE: Resource = Resource::Plans;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /plans/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCreate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "activo")]
    pub active: bool,
}

/// Body of `PUT /plans/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanUpdate {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_wire_names() {
        let plan: Plan = serde_json::from_value(json!({
            "id": "p-1",
            "nombre": "Basico",
            "descripcion": null,
            "activo": false
        }))
        .unwrap();
        assert_eq!(plan.name, "Basico");
        assert_eq!(plan.description, None);
        assert!(!plan.active);

        let update = PlanUpdate { name: Some("Plus".into()), ..Default::default() };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "nombre": "Plus" }));
    }
}
