//! Traffic Signal Identifier Web App (Leptos + WASM)

mod app;
pub mod browser;
mod components;
mod logger;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init();
    leptos::mount::mount_to_body(app::App);
}
