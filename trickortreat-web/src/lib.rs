#![forbid(unsafe_code)]
//! Browser host for the trick-or-treat card: Yew views over the engine
//! session, Web Audio cues and the canvas voucher export.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod audio;
pub mod components;
pub mod dom;
pub mod export;
pub mod logger;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    yew::Renderer::<app::App>::new().render();
}
