//! Settings routing
//!
//! The background service owns persistence and broadcasts every change to
//! all tabs. This module decodes those broadcasts and routes each feature to
//! its handler.

mod feature;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use feature::{Feature, FeatureHost, Handler, SettingValue};

use crate::Result;

/// Full settings snapshot, with the store's first-install defaults
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub voice_input: bool,
    pub gesture_input: bool,
    pub dyslexia_font: bool,
    pub text_to_speech: bool,
    pub colorblind_mode: String,
    pub adhd_mode: bool,
    pub high_contrast: bool,
    pub dark_mode: bool,
    pub widget_position: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            voice_input: false,
            gesture_input: false,
            dyslexia_font: false,
            text_to_speech: false,
            colorblind_mode: "none".to_string(),
            adhd_mode: false,
            high_contrast: false,
            dark_mode: false,
            widget_position: "bottom-right".to_string(),
        }
    }
}

impl Settings {
    pub fn value(&self, feature: Feature) -> SettingValue {
        match feature {
            Feature::VoiceInput => SettingValue::Flag(self.voice_input),
            Feature::GestureInput => SettingValue::Flag(self.gesture_input),
            Feature::DyslexiaFont => SettingValue::Flag(self.dyslexia_font),
            Feature::TextToSpeech => SettingValue::Flag(self.text_to_speech),
            Feature::ColorblindMode => SettingValue::Choice(self.colorblind_mode.clone()),
            Feature::AdhdMode => SettingValue::Flag(self.adhd_mode),
            Feature::HighContrast => SettingValue::Flag(self.high_contrast),
            Feature::DarkMode => SettingValue::Flag(self.dark_mode),
            Feature::WidgetPosition => SettingValue::Choice(self.widget_position.clone()),
        }
    }

    /// Push every feature in the snapshot to `host`.
    pub fn apply<H: FeatureHost + ?Sized>(&self, host: &mut H) {
        for feature in Feature::ALL {
            // A snapshot always carries the right shape per feature
            if let Err(err) = feature.apply(host, &self.value(feature)) {
                warn!(%err, "skipping setting");
            }
        }
    }
}

/// A single feature change
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureChange {
    pub feature: Feature,
    pub value: SettingValue,
}

/// Messages the background service sends to each tab
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RuntimeMessage {
    SettingsUpdated { data: Settings },
    FeatureToggled { data: FeatureChange },
    InitializeWithSettings { settings: Settings },
}

impl RuntimeMessage {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Route the message to `host`.
    pub fn apply<H: FeatureHost + ?Sized>(&self, host: &mut H) -> Result<()> {
        match self {
            RuntimeMessage::SettingsUpdated { data } => data.apply(host),
            RuntimeMessage::InitializeWithSettings { settings } => settings.apply(host),
            RuntimeMessage::FeatureToggled { data } => data.feature.apply(host, &data.value)?,
        }
        Ok(())
    }
}
