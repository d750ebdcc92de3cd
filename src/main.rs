//! Sondages Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod controller;
mod dom;
mod error;
mod models;
mod payload;
mod sequence;

use config::{ClientConfig, CONFIG_ELEMENT_ID};
use log::{error, warn, LevelFilter};

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init(LevelFilter::Info) {
        // another logger owns the facade; report through it
        warn!("console logger not installed: {}", e);
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        error!("no document, poll list controller not started");
        return;
    };

    let (config, config_error) = ClientConfig::load(&document);
    console_logger::set_level(config.log_level_filter());
    if let Some(e) = config_error {
        warn!("ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
    }

    match app::start(config) {
        Ok(handle) => handle.forget(),
        Err(e) => error!("poll list controller not started: {}", e),
    }
}
