// ==================== Imports ====================
use wasm_bindgen::prelude::*;

#[macro_use]
pub mod browser;
pub mod config;
pub mod engine;
pub mod game;
pub mod sprite;
pub mod ui;
pub mod world;

use engine::GameLoop;
use game::HeroVsDino;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - installs the panic hook
/// - loads config, images and HUD elements
/// - starts the requestAnimationFrame loop
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        // a missing image, canvas or HUD element is unrecoverable
        if let Err(err) = GameLoop::start(HeroVsDino::new()).await {
            error!("Could not start game : {:#?}", err);
        }
    });

    Ok(())
}
