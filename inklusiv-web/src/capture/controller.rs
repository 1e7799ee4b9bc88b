//! Capture controller - camera + landmark source lifecycle
//!
//! Disabled → Starting → Active → Disabled, with Starting → Disabled when the
//! camera cannot be opened. Camera acquisition is asynchronous, so a start is
//! split in two: `begin` reserves a session id, `complete` hands over the
//! stream once it arrives. Anything tagged with a stale id is rejected.

use std::cell::Cell;
use std::mem;

use tracing::{info, warn};

use super::source::{CameraStream, LandmarkSource};
use crate::config::LandmarkOptions;
use crate::{Error, Result};

/// Identifies one capture session; frame results carry it back.
pub type SessionId = u32;

// Shared by every controller on the thread, so ids stay unique when a
// controller is replaced while a start is still in flight
thread_local! {
    static NEXT_SESSION_ID: Cell<SessionId> = const { Cell::new(1) };
}

fn next_session_id() -> SessionId {
    NEXT_SESSION_ID.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1).max(1));
        id
    })
}

/// Observable controller state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureStatus {
    Disabled,
    Starting,
    Active,
}

/// Result of an enable request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnableOutcome {
    /// Camera must now be opened for this session
    Pending(SessionId),
    /// Already starting or active; nothing to do
    AlreadyRunning,
}

/// The active camera binding. Dropping it stops the stream.
pub struct CaptureSession<S: CameraStream> {
    id: SessionId,
    stream: S,
}

impl<S: CameraStream> CaptureSession<S> {
    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl<S: CameraStream> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        self.stream.stop();
    }
}

enum CaptureState<S: CameraStream> {
    Disabled,
    Starting(SessionId),
    Active(CaptureSession<S>),
}

/// Owns at most one capture session per page
pub struct CaptureController<S: CameraStream> {
    state: CaptureState<S>,
}

impl<S: CameraStream> CaptureController<S> {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Disabled,
        }
    }

    pub fn status(&self) -> CaptureStatus {
        match self.state {
            CaptureState::Disabled => CaptureStatus::Disabled,
            CaptureState::Starting(_) => CaptureStatus::Starting,
            CaptureState::Active(_) => CaptureStatus::Active,
        }
    }

    /// Id of the active session, if frames should be flowing
    pub fn active_session(&self) -> Option<SessionId> {
        match &self.state {
            CaptureState::Active(session) => Some(session.id()),
            _ => None,
        }
    }

    /// Whether a frame result tagged `id` belongs to the live session
    pub fn accepts(&self, id: SessionId) -> bool {
        self.active_session() == Some(id)
    }

    /// Request a new session.
    ///
    /// Fails with [`Error::Unavailable`] and leaves the controller disabled
    /// when the landmark model is not loaded.
    pub fn begin<L: LandmarkSource + ?Sized>(
        &mut self,
        source: &mut L,
        options: &LandmarkOptions,
    ) -> Result<EnableOutcome> {
        if !matches!(self.state, CaptureState::Disabled) {
            return Ok(EnableOutcome::AlreadyRunning);
        }

        if !source.is_available() {
            return Err(Error::Unavailable);
        }
        source.configure(options)?;

        let id = next_session_id();
        self.state = CaptureState::Starting(id);
        info!(session = id, "capture starting");

        Ok(EnableOutcome::Pending(id))
    }

    /// Hand over the outcome of opening the camera for session `id`.
    ///
    /// A stream for a session that is no longer starting (disabled in the
    /// meantime, or superseded) is stopped on the spot.
    pub fn complete(&mut self, id: SessionId, stream: Result<S>) -> Result<SessionId> {
        let starting = matches!(self.state, CaptureState::Starting(current) if current == id);

        match stream {
            Ok(stream) if starting => {
                self.state = CaptureState::Active(CaptureSession { id, stream });
                info!(session = id, "✅ capture active");
                Ok(id)
            }
            Err(err) if starting => {
                self.state = CaptureState::Disabled;
                warn!(session = id, %err, "capture failed to start");
                Err(err)
            }
            Ok(mut stream) => {
                stream.stop();
                info!(session = id, "discarding stream for cancelled session");
                Err(Error::Cancelled(id))
            }
            Err(_) => Err(Error::Cancelled(id)),
        }
    }

    /// Tear down whatever is running. Returns the status before the call.
    pub fn stop(&mut self) -> CaptureStatus {
        let previous = self.status();
        // Dropping an active session stops its stream
        match mem::replace(&mut self.state, CaptureState::Disabled) {
            CaptureState::Active(session) => info!(session = session.id(), "capture stopped"),
            CaptureState::Starting(id) => info!(session = id, "capture start cancelled"),
            CaptureState::Disabled => {}
        }
        previous
    }
}

impl<S: CameraStream> Default for CaptureController<S> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::{FakeSource, FakeStream};
    use super::*;

    fn started(controller: &mut CaptureController<FakeStream>, source: &mut FakeSource) -> SessionId {
        match controller.begin(source, &LandmarkOptions::default()).unwrap() {
            EnableOutcome::Pending(id) => id,
            EnableOutcome::AlreadyRunning => panic!("expected a new session"),
        }
    }

    #[test]
    fn test_unavailable_model_refuses_start() {
        let mut controller = CaptureController::<FakeStream>::new();
        let mut source = FakeSource::default();
        let err = controller.begin(&mut source, &LandmarkOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Unavailable));
        assert_eq!(controller.status(), CaptureStatus::Disabled);
        assert!(source.configured.is_empty());
    }

    #[test]
    fn test_start_configures_source() {
        let mut controller = CaptureController::<FakeStream>::new();
        let mut source = FakeSource::ready();
        started(&mut controller, &mut source);
        assert_eq!(controller.status(), CaptureStatus::Starting);
        assert_eq!(source.configured, vec![LandmarkOptions::default()]);
    }

    #[test]
    fn test_full_lifecycle() {
        let mut controller = CaptureController::new();
        let mut source = FakeSource::ready();
        let id = started(&mut controller, &mut source);

        let (stream, stops) = FakeStream::new();
        assert_eq!(controller.complete(id, Ok(stream)).unwrap(), id);
        assert_eq!(controller.status(), CaptureStatus::Active);
        assert!(controller.accepts(id));

        assert_eq!(controller.stop(), CaptureStatus::Active);
        assert_eq!(stops.get(), 1);
        assert_eq!(controller.status(), CaptureStatus::Disabled);
        assert!(!controller.accepts(id));
    }

    #[test]
    fn test_enable_while_running_is_noop() {
        let mut controller = CaptureController::new();
        let mut source = FakeSource::ready();
        let id = started(&mut controller, &mut source);
        assert_eq!(
            controller.begin(&mut source, &LandmarkOptions::default()).unwrap(),
            EnableOutcome::AlreadyRunning
        );

        let (stream, _) = FakeStream::new();
        controller.complete(id, Ok(stream)).unwrap();
        assert_eq!(
            controller.begin(&mut source, &LandmarkOptions::default()).unwrap(),
            EnableOutcome::AlreadyRunning
        );
        assert_eq!(controller.active_session(), Some(id));
        assert_eq!(source.configured.len(), 1);
    }

    #[test]
    fn test_permission_denied_reverts_to_disabled() {
        let mut controller = CaptureController::<FakeStream>::new();
        let mut source = FakeSource::ready();
        let id = started(&mut controller, &mut source);
        let err = controller.complete(id, Err(Error::PermissionDenied)).unwrap_err();
        assert!(matches!(err, Error::PermissionDenied));
        assert_eq!(controller.status(), CaptureStatus::Disabled);
    }

    #[test]
    fn test_stream_after_cancel_is_stopped() {
        let mut controller = CaptureController::new();
        let mut source = FakeSource::ready();
        let id = started(&mut controller, &mut source);
        assert_eq!(controller.stop(), CaptureStatus::Starting);

        let (stream, stops) = FakeStream::new();
        assert!(matches!(controller.complete(id, Ok(stream)), Err(Error::Cancelled(_))));
        assert_eq!(stops.get(), 1);
        assert_eq!(controller.status(), CaptureStatus::Disabled);
    }

    #[test]
    fn test_stale_session_cannot_take_over() {
        let mut controller = CaptureController::new();
        let mut source = FakeSource::ready();
        let old = started(&mut controller, &mut source);
        controller.stop();
        let new = started(&mut controller, &mut source);
        assert_ne!(old, new);

        let (stale, stale_stops) = FakeStream::new();
        assert!(controller.complete(old, Ok(stale)).is_err());
        assert_eq!(stale_stops.get(), 1);
        assert_eq!(controller.status(), CaptureStatus::Starting);

        let (fresh, _) = FakeStream::new();
        assert_eq!(controller.complete(new, Ok(fresh)).unwrap(), new);
    }

    #[test]
    fn test_replaced_controller_ignores_old_start() {
        let mut source = FakeSource::ready();
        let mut old = CaptureController::<FakeStream>::new();
        let pending = started(&mut old, &mut source);

        let mut replacement = CaptureController::new();
        let current = started(&mut replacement, &mut source);
        assert_ne!(pending, current);

        let (late, late_stops) = FakeStream::new();
        assert!(matches!(
            replacement.complete(pending, Ok(late)),
            Err(Error::Cancelled(_))
        ));
        assert_eq!(late_stops.get(), 1);
        assert_eq!(replacement.status(), CaptureStatus::Starting);
    }

    #[test]
    fn test_stop_when_disabled() {
        let mut controller = CaptureController::<FakeStream>::new();
        assert_eq!(controller.stop(), CaptureStatus::Disabled);
    }

    #[test]
    fn test_drop_stops_active_stream() {
        let mut controller = CaptureController::new();
        let mut source = FakeSource::ready();
        let id = started(&mut controller, &mut source);
        let (stream, stops) = FakeStream::new();
        controller.complete(id, Ok(stream)).unwrap();
        drop(controller);
        assert_eq!(stops.get(), 1);
    }
}
