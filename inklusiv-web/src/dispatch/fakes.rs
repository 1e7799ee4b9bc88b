//! In-memory page and notifier for tests

use super::{Notification, Notifier, PageActions};
use crate::{Error, Result};

/// Records every page primitive it is asked to perform
#[derive(Debug, Default)]
pub(crate) struct FakePage {
    pub scrolled: Vec<f64>,
    pub back: u32,
    pub reloads: u32,
    pub clicks: Vec<&'static str>,
    pub focused_clickable: bool,
    pub has_button: bool,
    pub speaking: bool,
    pub speech_stops: u32,
    pub voice_input: bool,
    pub fail_scroll: bool,
    pub indicator: Vec<bool>,
}

impl PageActions for FakePage {
    fn scroll_by(&mut self, dy: f64) -> Result<()> {
        if self.fail_scroll {
            return Err(Error::Page("scroll blocked".to_string()));
        }
        self.scrolled.push(dy);
        Ok(())
    }

    fn history_back(&mut self) -> Result<()> {
        self.back += 1;
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.reloads += 1;
        Ok(())
    }

    fn click_focused(&mut self) -> Result<bool> {
        if self.focused_clickable {
            self.clicks.push("focused");
        }
        Ok(self.focused_clickable)
    }

    fn click_first_button(&mut self) -> Result<bool> {
        if self.has_button {
            self.clicks.push("button");
        }
        Ok(self.has_button)
    }

    fn is_speaking(&self) -> bool {
        self.speaking
    }

    fn stop_speaking(&mut self) -> Result<()> {
        self.speaking = false;
        self.speech_stops += 1;
        Ok(())
    }

    fn voice_input_enabled(&self) -> bool {
        self.voice_input
    }

    fn set_voice_input(&mut self, enabled: bool) -> Result<()> {
        self.voice_input = enabled;
        Ok(())
    }

    fn set_gesture_indicator(&mut self, active: bool) -> Result<()> {
        self.indicator.push(active);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    pub shown: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn texts(&self) -> Vec<&str> {
        self.shown.iter().map(|n| n.text.as_str()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.shown.push(notification);
    }
}
