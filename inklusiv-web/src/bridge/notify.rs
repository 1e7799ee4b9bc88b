//! On-page notifications

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::dispatch::{Notification, Notifier};

const STYLE_ID: &str = "inklusiv-notification-styles";

const NOTIFICATION_CSS: &str = "
.inklusiv-notification {
  position: fixed;
  top: 20px;
  right: 20px;
  background: #333;
  color: white;
  padding: 12px 16px;
  border-radius: 8px;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  font-size: 14px;
  z-index: 2147483647;
  box-shadow: 0 4px 12px rgba(0,0,0,0.3);
  max-width: 300px;
  word-wrap: break-word;
  white-space: pre-line;
  animation: inklusivSlideIn 0.3s ease-out;
}
.inklusiv-notification-success { background: #10b981; }
.inklusiv-notification-error { background: #ef4444; }
.inklusiv-notification-warning { background: #f59e0b; }
@keyframes inklusivSlideIn {
  from { transform: translateX(100%); opacity: 0; }
  to { transform: translateX(0); opacity: 1; }
}
";

#[derive(Default)]
pub(crate) struct WebNotifier;

impl Notifier for WebNotifier {
    fn notify(&mut self, notification: Notification) {
        if let Err(err) = show(&notification) {
            warn!(error = ?err, text = %notification.text, "could not show notification");
        }
    }
}

fn show(notification: &Notification) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;

    inject_styles(&document)?;

    let element = document.create_element("div")?;
    element.set_class_name(&format!(
        "inklusiv-notification inklusiv-notification-{}",
        notification.severity.as_str()
    ));
    // Plain text only
    element.set_text_content(Some(&notification.text));
    body.append_child(&element)?;

    let dismiss = Closure::once_into_js(move || element.remove());
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        dismiss.unchecked_ref(),
        notification.duration_ms.min(i32::MAX as u32) as i32,
    )?;
    Ok(())
}

fn inject_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(NOTIFICATION_CSS));
    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => document
            .document_element()
            .ok_or_else(|| JsValue::from_str("no document element"))?
            .append_child(&style)?,
    };
    Ok(())
}
