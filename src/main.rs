//! Insurance Admin Console Entry Point

mod app;
mod backend;
mod components;
mod context;
mod logger;
mod router;
mod settings;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, problem) = settings::load();
    logger::init(config.level_filter().unwrap_or(log::LevelFilter::Info));
    if let Some(problem) = problem {
        log::warn!("ignoring {}: {}", settings::CONFIG_GLOBAL, problem);
    }
    log::info!("console starting, backend at {}", config.api_base);

    mount_to_body(move || view! { <App config=config /> });
}
