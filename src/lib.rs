//! Wild West Hangman core crate.
//!
//! The game rules (`words`, `round`, `controller`) are plain Rust and run
//! anywhere; `render`, `audio` and `web` bind them to a browser canvas, HTML
//! audio and the DOM. `start_game()` is the entrypoint the host page calls.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod controller;
pub mod error;
pub mod render;
pub mod round;
pub mod web;
pub mod words;

pub use audio::{AudioAdapter, AudioConfig, AudioError, AudioSession, SessionPhase, WebAudio};
pub use controller::{Command, Controls, Delta, Outcome, Phase, RoundController};
pub use error::GameError;
pub use render::{CanvasRenderer, RenderAdapter, Stage};
pub use round::{GuessKind, GuessResult, Letter, MAX_WRONG, RoundState, RoundStatus, evaluate};
pub use web::WebConfig;
pub use words::{Category, WordBank};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. a hot reload) fails harmlessly.
    console_log::init_with_level(log::Level::Info).ok();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Build the game UI with the built-in Wild West categories.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(WordBank::wild_west().clone(), WebConfig::default())
}

/// Build the game UI with categories from JSON:
/// `[{"name": "Easy", "words": ["Gold", "Guns"]}, ...]`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_words(json: &str) -> Result<(), JsValue> {
    let bank = WordBank::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    web::start(bank, WebConfig::default())
}

pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
