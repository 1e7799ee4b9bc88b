//! INKLUSIV Gesture Input - camera hand gestures for page navigation
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - The module start hook
//!
//! The wasm_bindgen entry points live in `bridge`; everything below it is
//! plain Rust and runs under native `cargo test`.

mod bridge;
pub mod capture;
pub mod classifier;
pub mod config;
pub mod dispatch;
mod error;
mod renderer;
pub mod runtime;
pub mod session;
pub mod settings;

use wasm_bindgen::prelude::*;

pub use error::{Error, Result};

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    apply_hand_results, disable_gesture_input, enable_gesture_input, gesture_session_id,
    handle_runtime_message, init_gesture_input, set_feature_handler, set_landmark_model_ready,
    set_landmark_source, set_settings_sink, show_gesture_help,
};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = wasm_tracing::set_as_global_default();
}
