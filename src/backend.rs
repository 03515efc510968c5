//! Backend Bindings
//!
//! `fetch`-based transport for the REST backend.

use async_trait::async_trait;
use console_core::api::{ApiClient, HttpRequest, HttpResponse, Transport};
use console_core::{ApiError, ApiResult};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub type Client = ApiClient<FetchTransport>;

#[derive(Debug, Clone)]
pub struct FetchTransport {
    api_base: String,
}

impl FetchTransport {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self { api_base: api_base.into() }
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let url = request.url(&self.api_base);

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_mode(RequestMode::Cors);
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let req = Request::new_with_str_and_init(&url, &init).map_err(network_error)?;
        req.headers().set("Accept", "application/json").map_err(network_error)?;
        if request.body.is_some() {
            req.headers().set("Content-Type", "application/json").map_err(network_error)?;
        }

        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&req))
            .await
            .map_err(network_error)?
            .dyn_into()
            .map_err(network_error)?;

        let text = JsFuture::from(response.text().map_err(network_error)?)
            .await
            .map_err(network_error)?;

        Ok(HttpResponse {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

/// `fetch` rejects with a `TypeError`; keep whatever text it carries
fn network_error(err: JsValue) -> ApiError {
    let message = err
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "request failed".to_string());
    ApiError::Network(message)
}
