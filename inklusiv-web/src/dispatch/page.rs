//! Page actuation primitives the dispatcher drives

use crate::Result;

/// Side effects a gesture can have on the page.
///
/// The browser implementation lives in `bridge::page`; tests use a recorder.
pub trait PageActions {
    /// Scroll the viewport vertically by `dy` pixels (negative is up).
    fn scroll_by(&mut self, dy: f64) -> Result<()>;

    /// Navigate one step back in history.
    fn history_back(&mut self) -> Result<()>;

    fn reload(&mut self) -> Result<()>;

    /// Click the focused element if it is a button or link.
    ///
    /// Returns false when nothing clickable has focus.
    fn click_focused(&mut self) -> Result<bool>;

    /// Click the first button, submit input or button input in document order.
    ///
    /// Returns false when the page has none.
    fn click_first_button(&mut self) -> Result<bool>;

    /// Whether text-to-speech is currently talking
    fn is_speaking(&self) -> bool;

    fn stop_speaking(&mut self) -> Result<()>;

    /// Current voice input state as last reported by the settings store
    fn voice_input_enabled(&self) -> bool;

    /// Ask the settings store to switch voice input on or off.
    fn set_voice_input(&mut self, enabled: bool) -> Result<()>;

    /// Mark the widget's gesture button as live or idle.
    fn set_gesture_indicator(&mut self, active: bool) -> Result<()>;
}
