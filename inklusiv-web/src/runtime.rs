//! Gesture runtime - one page's gesture input, end to end
//!
//! Binds the capture controller, the gesture session and the dispatcher to
//! the page collaborators, and turns lifecycle outcomes into notifications.

use tracing::{debug, trace};

use crate::capture::{
    CameraStream, CaptureController, CaptureStatus, EnableOutcome, LandmarkSource, SessionId,
};
use crate::classifier::{classify, HandDetection};
use crate::config::GestureConfig;
use crate::dispatch::{Dispatcher, GestureAction, Notification, Notifier, PageActions, GESTURE_HELP};
use crate::session::GestureSession;
use crate::{Error, Result};

pub struct GestureRuntime<S, L, P, N>
where
    S: CameraStream,
{
    config: GestureConfig,
    capture: CaptureController<S>,
    session: GestureSession,
    dispatcher: Dispatcher,
    source: L,
    page: P,
    notifier: N,
}

impl<S, L, P, N> GestureRuntime<S, L, P, N>
where
    S: CameraStream,
    L: LandmarkSource,
    P: PageActions,
    N: Notifier,
{
    pub fn new(config: GestureConfig, source: L, page: P, notifier: N) -> Self {
        Self {
            capture: CaptureController::new(),
            session: GestureSession::new(config.debounce_ms),
            dispatcher: Dispatcher::new(&config),
            config,
            source,
            page,
            notifier,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn status(&self) -> CaptureStatus {
        self.capture.status()
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.capture.active_session()
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn source_mut(&mut self) -> &mut L {
        &mut self.source
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// First half of enabling gesture input.
    ///
    /// On `Pending` the caller opens the camera and reports back through
    /// [`finish_enable`](Self::finish_enable).
    pub fn begin_enable(&mut self) -> Result<EnableOutcome> {
        match self.capture.begin(&mut self.source, &self.config.landmarks) {
            Ok(outcome) => Ok(outcome),
            Err(Error::Unavailable) => {
                self.notifier.notify(Notification::error("Gesture tracking not available"));
                Err(Error::Unavailable)
            }
            Err(err) => {
                self.notifier.notify(Notification::error("Failed to start gesture tracking"));
                Err(err)
            }
        }
    }

    /// Second half of enabling: the camera stream (or why there is none).
    pub fn finish_enable(&mut self, id: SessionId, stream: Result<S>) -> Result<SessionId> {
        let result = self.capture.complete(id, stream);
        match &result {
            Ok(_) => {
                self.show_indicator(true);
                self.notifier.notify(Notification::success("Gesture tracking started"));
            }
            Err(Error::Cancelled(_)) => {}
            Err(Error::PermissionDenied) => self.notifier.notify(Notification::error(
                "Camera access denied. Please allow camera access for gesture input.",
            )),
            Err(_) => self.notifier.notify(Notification::error("Failed to start gesture tracking")),
        }
        result
    }

    /// Stop capture. Returns the status before the call.
    pub fn disable(&mut self) -> CaptureStatus {
        let previous = self.capture.stop();
        if previous != CaptureStatus::Disabled {
            self.show_indicator(false);
            self.notifier.notify(Notification::info("Gesture tracking stopped"));
        }
        previous
    }

    fn show_indicator(&mut self, active: bool) {
        if let Err(err) = self.page.set_gesture_indicator(active) {
            debug!(%err, active, "gesture indicator not updated");
        }
    }

    /// Run one frame result captured under session `id`.
    ///
    /// Results from any session other than the active one are dropped, so a
    /// callback that lands after teardown does nothing. Returns the actions
    /// dispatched, in hand order (at most one per debounce window).
    pub fn handle_frame(
        &mut self,
        id: SessionId,
        hands: &[HandDetection],
        now_ms: f64,
    ) -> Vec<GestureAction> {
        if !self.capture.accepts(id) {
            trace!(session = id, "dropping frame for inactive session");
            return Vec::new();
        }

        let mut actions = Vec::new();
        for hand in hands {
            let gesture = classify(hand, self.config.ok_distance);
            if let Some(action) = self.dispatcher.dispatch(
                &mut self.session,
                gesture,
                hand.handedness,
                now_ms,
                &mut self.page,
                &mut self.notifier,
            ) {
                actions.push(action);
            }
        }
        actions
    }

    pub fn show_help(&mut self) {
        self.notifier
            .notify(Notification::info(GESTURE_HELP).with_duration(self.config.help_ms));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::capture::fakes::{FakeSource, FakeStream};
    use crate::classifier::{posed_hand, Handedness};
    use crate::dispatch::fakes::{FakePage, RecordingNotifier};
    use crate::dispatch::Severity;

    type TestRuntime = GestureRuntime<FakeStream, FakeSource, FakePage, RecordingNotifier>;

    const POINT: [bool; 5] = [false, true, false, false, false];

    fn runtime() -> TestRuntime {
        GestureRuntime::new(
            GestureConfig::default(),
            FakeSource::ready(),
            FakePage::default(),
            RecordingNotifier::default(),
        )
    }

    fn activate(rt: &mut TestRuntime) -> (SessionId, Rc<Cell<u32>>) {
        let id = match rt.begin_enable().unwrap() {
            EnableOutcome::Pending(id) => id,
            EnableOutcome::AlreadyRunning => panic!("already running"),
        };
        let (stream, stops) = FakeStream::new();
        rt.finish_enable(id, Ok(stream)).unwrap();
        (id, stops)
    }

    #[test]
    fn test_point_scrolls_once_per_window() {
        let mut rt = runtime();
        let (id, _) = activate(&mut rt);
        let hand = posed_hand(POINT, Handedness::Right);

        let actions = rt.handle_frame(id, &[hand.clone()], 1000.0);
        assert_eq!(actions, vec![GestureAction::ScrollDown]);
        assert_eq!(rt.page().scrolled, vec![200.0]);

        assert!(rt.handle_frame(id, &[hand], 1100.0).is_empty());
        assert_eq!(rt.page().scrolled, vec![200.0]);
    }

    #[test]
    fn test_two_hands_same_frame_dispatch_once() {
        let mut rt = runtime();
        let (id, _) = activate(&mut rt);
        let hands = [
            posed_hand([false; 5], Handedness::Left),
            posed_hand(POINT, Handedness::Right),
        ];
        assert_eq!(rt.handle_frame(id, &hands, 0.0), vec![GestureAction::GoBack]);
        assert!(rt.page().scrolled.is_empty());
    }

    #[test]
    fn test_unrecognized_hand_does_not_block_the_next() {
        let mut rt = runtime();
        let (id, _) = activate(&mut rt);
        let hands = [
            posed_hand([false, false, true, true, false], Handedness::Left),
            posed_hand(POINT, Handedness::Right),
        ];
        assert_eq!(rt.handle_frame(id, &hands, 0.0), vec![GestureAction::ScrollDown]);
    }

    #[test]
    fn test_disable_stops_stream_and_ignores_stale_results() {
        let mut rt = runtime();
        let (id, stops) = activate(&mut rt);

        assert_eq!(rt.disable(), CaptureStatus::Active);
        assert_eq!(stops.get(), 1);
        assert_eq!(rt.status(), CaptureStatus::Disabled);

        let late = rt.handle_frame(id, &[posed_hand(POINT, Handedness::Right)], 5000.0);
        assert!(late.is_empty());
        assert!(rt.page().scrolled.is_empty());
        assert_eq!(rt.session().dispatched(), 0);
    }

    #[test]
    fn test_frames_before_active_are_ignored() {
        let mut rt = runtime();
        let id = match rt.begin_enable().unwrap() {
            EnableOutcome::Pending(id) => id,
            EnableOutcome::AlreadyRunning => unreachable!(),
        };
        assert!(rt.handle_frame(id, &[posed_hand(POINT, Handedness::Left)], 0.0).is_empty());
    }

    #[test]
    fn test_unavailable_model_notifies() {
        let mut rt: TestRuntime = GestureRuntime::new(
            GestureConfig::default(),
            FakeSource::default(),
            FakePage::default(),
            RecordingNotifier::default(),
        );
        assert!(matches!(rt.begin_enable(), Err(Error::Unavailable)));
        assert_eq!(rt.status(), CaptureStatus::Disabled);
        assert_eq!(rt.notifier.texts(), vec!["Gesture tracking not available"]);
        assert_eq!(rt.notifier.shown[0].severity, Severity::Error);
    }

    #[test]
    fn test_permission_denied_has_its_own_message() {
        let mut rt = runtime();
        let id = match rt.begin_enable().unwrap() {
            EnableOutcome::Pending(id) => id,
            EnableOutcome::AlreadyRunning => unreachable!(),
        };
        assert!(rt.finish_enable(id, Err(Error::PermissionDenied)).is_err());
        assert_eq!(rt.status(), CaptureStatus::Disabled);
        assert_eq!(
            rt.notifier.texts(),
            vec!["Camera access denied. Please allow camera access for gesture input."]
        );
    }

    #[test]
    fn test_generic_camera_failure() {
        let mut rt = runtime();
        let id = match rt.begin_enable().unwrap() {
            EnableOutcome::Pending(id) => id,
            EnableOutcome::AlreadyRunning => unreachable!(),
        };
        assert!(rt.finish_enable(id, Err(Error::Camera("NotReadableError".into()))).is_err());
        assert_eq!(rt.notifier.texts(), vec!["Failed to start gesture tracking"]);
    }

    #[test]
    fn test_cancelled_start_is_quiet() {
        let mut rt = runtime();
        let id = match rt.begin_enable().unwrap() {
            EnableOutcome::Pending(id) => id,
            EnableOutcome::AlreadyRunning => unreachable!(),
        };
        rt.disable();
        let (stream, stops) = FakeStream::new();
        assert!(matches!(rt.finish_enable(id, Ok(stream)), Err(Error::Cancelled(_))));
        assert_eq!(stops.get(), 1);
        assert_eq!(rt.notifier.texts(), vec!["Gesture tracking stopped"]);
    }

    #[test]
    fn test_lifecycle_notifications() {
        let mut rt = runtime();
        activate(&mut rt);
        assert_eq!(rt.begin_enable().unwrap(), EnableOutcome::AlreadyRunning);
        rt.disable();
        rt.disable();
        assert_eq!(
            rt.notifier.texts(),
            vec!["Gesture tracking started", "Gesture tracking stopped"]
        );
    }

    #[test]
    fn test_indicator_follows_capture() {
        let mut rt = runtime();
        activate(&mut rt);
        assert_eq!(rt.page().indicator, vec![true]);
        rt.disable();
        rt.disable();
        assert_eq!(rt.page().indicator, vec![true, false]);
    }

    #[test]
    fn test_failed_start_leaves_indicator_alone() {
        let mut rt = runtime();
        let id = match rt.begin_enable().unwrap() {
            EnableOutcome::Pending(id) => id,
            EnableOutcome::AlreadyRunning => unreachable!(),
        };
        assert!(rt.finish_enable(id, Err(Error::PermissionDenied)).is_err());
        assert!(rt.page().indicator.is_empty());
    }

    #[test]
    fn test_result_from_previous_session_is_dropped() {
        let mut rt = runtime();
        let (first, _) = activate(&mut rt);
        rt.disable();
        let (second, _) = activate(&mut rt);
        assert_ne!(first, second);

        let hand = posed_hand(POINT, Handedness::Right);
        assert!(rt.handle_frame(first, &[hand.clone()], 1000.0).is_empty());
        assert!(rt.page().scrolled.is_empty());
        assert_eq!(rt.handle_frame(second, &[hand], 1000.0), vec![GestureAction::ScrollDown]);
    }

    #[test]
    fn test_help_uses_configured_duration() {
        let mut rt = runtime();
        rt.show_help();
        assert_eq!(rt.notifier.shown[0].duration_ms, 6000);
        assert!(rt.notifier.shown[0].text.starts_with("Gesture Controls:"));
    }
}
