//! Transient on-page messages

/// Default time a notification stays on screen (ms)
pub const DEFAULT_NOTIFICATION_MS: u32 = 3000;

/// Notification styling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A message for the user that dismisses itself
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
    pub duration_ms: u32,
}

impl Notification {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
            duration_ms: DEFAULT_NOTIFICATION_MS,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Error)
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Somewhere to show notifications
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}
