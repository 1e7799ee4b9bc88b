//! Renderer module - WebGPU preview of the tracked hands
//!
//! Re-exports only. All logic in submodules.

mod shapes;
mod skeleton;
mod state;

pub use skeleton::render_hands;
pub use state::PreviewError;
pub(crate) use state::{initialize_preview, install_preview, release_preview};
