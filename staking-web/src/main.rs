//! Cranium & Stallion staking dApp
//!
//! Browser frontend: connect a wallet through any supported connector,
//! approve both NFT collections for the staking contract, pick token pairs
//! and stake them.

use leptos::prelude::*;
use lib_core::{init_config, Config};
use wasm_bindgen::prelude::*;

mod app;
mod components;
mod services;
mod state;
mod utils;

use app::App;
use utils::constants::APP_CONFIG_JSON;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Initialize logger; lib-core's tracing events arrive through the `log` facade
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Cranium staking starting...");

    if let Err(e) = load_config() {
        log::error!("Refusing to start: {}", e.user_message());
        return;
    }

    leptos::mount::mount_to_body(|| view! { <App/> });
}

fn load_config() -> lib_core::Result<()> {
    let config = Config::from_json(APP_CONFIG_JSON)?;
    init_config(config)?;
    Ok(())
}
