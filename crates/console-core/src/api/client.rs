//! Typed backend calls.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{Entity, ListPage, Quote, Record, RecordKind, Resource};
use crate::error::{ApiError, ApiResult};
use crate::query::PageRequest;

use super::mutation::Mutation;
use super::transport::{HttpRequest, Method, Transport};

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R: DeserializeOwned>(&self, request: HttpRequest) -> ApiResult<R> {
        let method = request.method;
        let path = request.path.clone();
        log::debug!("{} {}", method.as_str(), path);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            log::warn!("{} {} -> {}: {}", method.as_str(), path, response.status, err);
            return Err(err);
        }
        let body = if response.body.trim().is_empty() { "null" } else { response.body.as_str() };
        serde_json::from_str(body).map_err(|e| {
            log::error!("{} {} returned an unexpected body: {}", method.as_str(), path, e);
            ApiError::from(e)
        })
    }

    /// `GET /{resource}/?skip&limit`
    pub async fn list<R: DeserializeOwned>(
        &self,
        resource: Resource,
        request: PageRequest,
    ) -> ApiResult<ListPage<R>> {
        let http = HttpRequest::new(Method::Get, format!("/{}/", resource.path()))
            .query("skip", request.skip())
            .query("limit", request.limit());
        self.call(http).await
    }

    /// One page of plans, items or users
    pub async fn list_records(
        &self,
        kind: RecordKind,
        request: PageRequest,
    ) -> ApiResult<ListPage<Record>> {
        let page: ListPage<Value> = self.list(kind.resource(), request).await?;
        let data = page
            .data
            .into_iter()
            .map(|row| kind.decode(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ListPage { data, count: page.count, has_next: page.has_next })
    }

    pub async fn list_quotes(&self, request: PageRequest) -> ApiResult<ListPage<Quote>> {
        self.list(Quote::RESOURCE, request).await
    }

    /// Every quote the backend holds, fetched `batch_size` at a time until
    /// a short batch, an empty batch or the reported total ends the walk.
    pub async fn list_all_quotes(&self, batch_size: usize) -> ApiResult<Vec<Quote>> {
        let mut all = Vec::new();
        let mut request = PageRequest::new(1, batch_size);
        loop {
            let page = self.list_quotes(request).await?;
            let returned = page.len();
            let done = returned < request.size
                || page.has_next == Some(false)
                || page.count.is_some_and(|total| (all.len() + returned) as u64 >= total);
            all.extend(page.data);
            if done || returned == 0 {
                break;
            }
            request = request.next();
        }
        log::info!("loaded {} quotes", all.len());
        Ok(all)
    }

    /// Send a write. Creates and updates return the stored record.
    pub async fn execute(&self, mutation: &Mutation) -> ApiResult<Option<Record>> {
        let request = mutation.to_request()?;
        if mutation.is_delete() {
            let _: Value = self.call(request).await?;
            log::info!("deleted {} record", mutation.kind().label());
            return Ok(None);
        }
        let row: Value = self.call(request).await?;
        let record = mutation.kind().decode(row)?;
        log::info!("saved {} {}", mutation.kind().label(), record.id());
        Ok(Some(record))
    }
}
