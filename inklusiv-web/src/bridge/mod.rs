//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod camera;
mod entry;
mod features;
mod feed;
mod notify;
mod page;
mod source;

pub use entry::{
    apply_hand_results, disable_gesture_input, enable_gesture_input, gesture_session_id,
    handle_runtime_message, init_gesture_input, set_feature_handler, set_landmark_model_ready,
    set_landmark_source, set_settings_sink, show_gesture_help,
};
