//! In-memory stand-in for the REST backend, used by tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::domain::Resource;
use crate::error::{ApiError, ApiResult};

use super::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Scripted failure for the next request
#[derive(Debug, Clone)]
pub(crate) enum Failure {
    Offline,
    Status(u16, String),
}

#[derive(Default)]
pub(crate) struct MemoryBackend {
    tables: RefCell<HashMap<Resource, Vec<Value>>>,
    next_id: Cell<u32>,
    failure: RefCell<Option<Failure>>,
    report_count: bool,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MemoryBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer lists with a `{data, count}` envelope
    pub(crate) fn with_count(mut self) -> Self {
        self.report_count = true;
        self
    }

    pub(crate) fn seed(&self, resource: Resource, rows: Vec<Value>) {
        self.tables.borrow_mut().entry(resource).or_default().extend(rows);
    }

    pub(crate) fn fail_next(&self, failure: Failure) {
        *self.failure.borrow_mut() = Some(failure);
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn rows(&self, resource: Resource) -> Vec<Value> {
        self.tables.borrow().get(&resource).cloned().unwrap_or_default()
    }

    fn required_field(resource: Resource) -> &'static str {
        match resource {
            Resource::Plans => "nombre",
            Resource::Items => "title",
            Resource::Users => "email",
            Resource::Quotes => "id",
        }
    }

    fn reply(status: u16, body: Value) -> HttpResponse {
        HttpResponse { status, body: body.to_string() }
    }

    fn not_found(resource: Resource) -> HttpResponse {
        let noun = resource.path().trim_end_matches('s');
        Self::reply(404, json!({ "detail": format!("{noun} not found") }))
    }

    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let mut segments = request.path.trim_matches('/').split('/');
        let Some(resource) = segments
            .next()
            .and_then(|seg| Resource::ALL.into_iter().find(|r| r.path() == seg))
        else {
            return Self::reply(404, json!({ "detail": "Not Found" }));
        };
        let id = segments.next().map(str::to_string);
        let body: Option<Map<String, Value>> = request
            .body
            .as_deref()
            .and_then(|b| serde_json::from_str::<Value>(b).ok())
            .and_then(|v| v.as_object().cloned());

        let mut tables = self.tables.borrow_mut();
        let rows = tables.entry(resource).or_default();
        let position = |rows: &Vec<Value>, id: &str| {
            rows.iter()
                .position(|r| r["id"].as_str() == Some(id) || r["id"].to_string() == id)
        };

        match (request.method, id) {
            (Method::Get, None) => {
                let number = |key: &str| request.query_value(key).and_then(|v| v.parse().ok());
                let skip = number("skip").unwrap_or(0usize);
                let limit = number("limit").unwrap_or(100usize);
                let data: Vec<Value> = rows.iter().skip(skip).take(limit).cloned().collect();
                if self.report_count {
                    Self::reply(200, json!({ "data": data, "count": rows.len() }))
                } else {
                    Self::reply(200, Value::Array(data))
                }
            }
            (Method::Post, None) => {
                let mut row = body.unwrap_or_default();
                let field = Self::required_field(resource);
                if row.get(field).and_then(Value::as_str).map_or(true, |v| v.trim().is_empty()) {
                    return Self::reply(
                        422,
                        json!({ "detail": [{
                            "loc": ["body", field],
                            "msg": "field required",
                            "type": "value_error.missing",
                        }] }),
                    );
                }
                self.next_id.set(self.next_id.get() + 1);
                let id = format!("{}-{}", resource.path(), self.next_id.get());
                row.insert("id".into(), json!(id));
                row.remove("password");
                let row = Value::Object(row);
                rows.push(row.clone());
                Self::reply(200, row)
            }
            (Method::Put | Method::Patch, Some(id)) => match position(rows, &id) {
                Some(index) => {
                    if let (Some(target), Some(patch)) = (rows[index].as_object_mut(), body) {
                        for (key, value) in patch {
                            if key != "password" {
                                target.insert(key, value);
                            }
                        }
                    }
                    Self::reply(200, rows[index].clone())
                }
                None => Self::not_found(resource),
            },
            (Method::Delete, Some(id)) => match position(rows, &id) {
                Some(index) => Self::reply(200, rows.remove(index)),
                None => Self::not_found(resource),
            },
            _ => Self::reply(405, json!({ "detail": "Method Not Allowed" })),
        }
    }
}

#[async_trait(?Send)]
impl Transport for MemoryBackend {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        match self.failure.borrow_mut().take() {
            Some(Failure::Offline) => return Err(ApiError::Network("connection refused".into())),
            Some(Failure::Status(status, body)) => return Ok(HttpResponse { status, body }),
            None => {}
        }
        Ok(self.handle(&request))
    }
}
