//! Feature identifiers and their handler table

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Every feature the settings store knows about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    VoiceInput,
    GestureInput,
    DyslexiaFont,
    TextToSpeech,
    ColorblindMode,
    AdhdMode,
    HighContrast,
    DarkMode,
    WidgetPosition,
}

impl Feature {
    pub const ALL: [Feature; 9] = [
        Feature::VoiceInput,
        Feature::GestureInput,
        Feature::DyslexiaFont,
        Feature::TextToSpeech,
        Feature::ColorblindMode,
        Feature::AdhdMode,
        Feature::HighContrast,
        Feature::DarkMode,
        Feature::WidgetPosition,
    ];

    /// Key used by the settings store and runtime messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::VoiceInput => "voiceInput",
            Feature::GestureInput => "gestureInput",
            Feature::DyslexiaFont => "dyslexiaFont",
            Feature::TextToSpeech => "textToSpeech",
            Feature::ColorblindMode => "colorblindMode",
            Feature::AdhdMode => "adhdMode",
            Feature::HighContrast => "highContrast",
            Feature::DarkMode => "darkMode",
            Feature::WidgetPosition => "widgetPosition",
        }
    }

    /// Look up this feature's handler on `H`.
    pub fn handler<H: FeatureHost + ?Sized>(self) -> Handler<H> {
        match self {
            Feature::VoiceInput => Handler::Switch(H::voice_input),
            Feature::GestureInput => Handler::Switch(H::gesture_input),
            Feature::DyslexiaFont => Handler::Switch(H::dyslexia_font),
            Feature::TextToSpeech => Handler::Switch(H::text_to_speech),
            Feature::AdhdMode => Handler::Switch(H::adhd_mode),
            Feature::HighContrast => Handler::Switch(H::high_contrast),
            Feature::DarkMode => Handler::Switch(H::dark_mode),
            Feature::ColorblindMode => Handler::Choice(H::colorblind_mode),
            Feature::WidgetPosition => Handler::Choice(H::widget_position),
        }
    }

    /// Route `value` to this feature's handler on `host`.
    pub fn apply<H: FeatureHost + ?Sized>(self, host: &mut H, value: &SettingValue) -> Result<()> {
        match (self.handler::<H>(), value) {
            (Handler::Switch(switch), SettingValue::Flag(enabled)) => switch(host, *enabled),
            (Handler::Choice(choose), SettingValue::Choice(choice)) => choose(host, choice),
            _ => return Err(Error::InvalidSetting(self.as_str())),
        }
        Ok(())
    }
}

/// A settings value: on/off features carry a flag, the rest a named choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Choice(String),
}

/// How a feature is switched
pub enum Handler<H: ?Sized> {
    Switch(fn(&mut H, bool)),
    Choice(fn(&mut H, &str)),
}

/// Whatever actually implements the accessibility features on a page
pub trait FeatureHost {
    fn voice_input(&mut self, enabled: bool);
    fn gesture_input(&mut self, enabled: bool);
    fn dyslexia_font(&mut self, enabled: bool);
    fn text_to_speech(&mut self, enabled: bool);
    fn adhd_mode(&mut self, enabled: bool);
    fn high_contrast(&mut self, enabled: bool);
    fn dark_mode(&mut self, enabled: bool);
    fn colorblind_mode(&mut self, mode: &str);
    fn widget_position(&mut self, position: &str);
}
