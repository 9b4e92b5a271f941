//! Chat HD Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod file;
mod hooks;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    // `log`クレートの出力をブラウザのコンソールへ
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
