//! Gesture → page action mapping and execution

use tracing::{debug, trace};

use super::{Notification, Notifier, PageActions};
use crate::classifier::{Gesture, Handedness};
use crate::config::GestureConfig;
use crate::session::GestureSession;
use crate::Result;

/// What a recognized gesture does to the page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureAction {
    ScrollDown,
    ScrollUp,
    /// Click the focused control, else the first button
    Click,
    GoBack,
    /// Stop speech if speaking, else reload
    StopOrRefresh,
    ToggleVoice,
}

impl GestureAction {
    /// Fixed mapping; `None` has no action.
    pub fn for_gesture(gesture: Gesture) -> Option<Self> {
        match gesture {
            Gesture::Point => Some(GestureAction::ScrollDown),
            Gesture::Peace => Some(GestureAction::ScrollUp),
            Gesture::Ok => Some(GestureAction::Click),
            Gesture::Fist => Some(GestureAction::GoBack),
            Gesture::Open => Some(GestureAction::StopOrRefresh),
            Gesture::ThumbsUp => Some(GestureAction::ToggleVoice),
            Gesture::None => None,
        }
    }

    /// Name shown to the user when the gesture fires
    pub fn label(&self) -> &'static str {
        match self {
            GestureAction::ScrollDown => "Point (Scroll Down)",
            GestureAction::ScrollUp => "Peace (Scroll Up)",
            GestureAction::Click => "OK (Click)",
            GestureAction::GoBack => "Fist (Go Back)",
            GestureAction::StopOrRefresh => "Open Hand (Stop/Refresh)",
            GestureAction::ToggleVoice => "Thumbs Up (Toggle Voice)",
        }
    }
}

/// Help text listing every gesture
pub const GESTURE_HELP: &str = "Gesture Controls:\n\
    👉 Point: Scroll down\n\
    ✌️ Peace: Scroll up\n\
    👌 OK: Click button/link\n\
    ✊ Fist: Go back\n\
    ✋ Open Hand: Stop/Refresh\n\
    👍 Thumbs Up: Toggle voice input\n\
    Double-click the camera preview to hide/show it.";

/// Runs gesture actions against the page
#[derive(Clone, Debug)]
pub struct Dispatcher {
    scroll_step: f64,
    feedback_ms: u32,
}

impl Dispatcher {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            scroll_step: config.scroll_step,
            feedback_ms: config.feedback_ms,
        }
    }

    /// Dispatch one classified gesture.
    ///
    /// `None` gestures return immediately without touching the session.
    /// Anything else must claim the session's debounce gate first; once
    /// claimed the action runs exactly once and feedback is shown. Action
    /// failures (nothing to click, blocked navigation) are not reported.
    pub fn dispatch<P, N>(
        &self,
        session: &mut GestureSession,
        gesture: Gesture,
        hand: Handedness,
        now_ms: f64,
        page: &mut P,
        notifier: &mut N,
    ) -> Option<GestureAction>
    where
        P: PageActions + ?Sized,
        N: Notifier + ?Sized,
    {
        let action = GestureAction::for_gesture(gesture)?;

        if !session.try_claim(now_ms) {
            trace!(gesture = gesture.as_str(), "gesture debounced");
            return None;
        }

        debug!(gesture = gesture.as_str(), hand = hand.as_str(), "gesture detected");

        if let Err(err) = self.perform(action, page) {
            debug!(%err, action = action.label(), "gesture action had no effect");
        }

        notifier.notify(
            Notification::info(format!("Gesture: {} ({} hand)", action.label(), hand.as_str()))
                .with_duration(self.feedback_ms),
        );

        Some(action)
    }

    fn perform<P: PageActions + ?Sized>(&self, action: GestureAction, page: &mut P) -> Result<()> {
        match action {
            GestureAction::ScrollDown => page.scroll_by(self.scroll_step),
            GestureAction::ScrollUp => page.scroll_by(-self.scroll_step),
            GestureAction::Click => {
                if !page.click_focused()? && !page.click_first_button()? {
                    debug!("nothing to click");
                }
                Ok(())
            }
            GestureAction::GoBack => page.history_back(),
            GestureAction::StopOrRefresh => {
                if page.is_speaking() {
                    page.stop_speaking()
                } else {
                    page.reload()
                }
            }
            GestureAction::ToggleVoice => {
                let enabled = page.voice_input_enabled();
                page.set_voice_input(!enabled)
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}
