//! Location handling
//!
//! The screen comes from the path, the page from the `page` search param.

use console_core::domain::Resource;
use console_core::query::parse_page;
use wasm_bindgen::JsValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub resource: Resource,
    pub page: u32,
}

impl Default for Route {
    fn default() -> Self {
        Self { resource: Resource::Plans, page: 1 }
    }
}

impl Route {
    pub fn href(&self) -> String {
        format!("/{}?page={}", self.resource.path(), self.page)
    }
}

/// Read the route from `window.location`
pub fn current() -> Route {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return Route::default();
    };
    let path = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    let page = web_sys::UrlSearchParams::new_with_str(&search)
        .ok()
        .and_then(|params| params.get("page"));

    Route {
        resource: Resource::from_path(&path),
        page: parse_page(page.as_deref()),
    }
}

/// Push `route` onto the history stack
pub fn push(route: Route) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(&route.href())) {
        log::warn!("could not update the location: {:?}", err);
    }
}
