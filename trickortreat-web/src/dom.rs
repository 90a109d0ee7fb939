use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

/// Retrieve the global `window` object.
///
/// # Errors
/// Returns an error outside a browser context.
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("`window` is unavailable"))
}

/// Retrieve the document for DOM interactions.
///
/// # Errors
/// Returns an error when no window or document exists.
pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("`document` is unavailable"))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Run `callback` once after `delay_ms`. The closure frees itself after it fires.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled.
pub fn set_timeout(delay_ms: u32, callback: impl FnOnce() + 'static) -> Result<i32, JsValue> {
    let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    let closure = Closure::once_into_js(callback);
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.unchecked_ref(),
        timeout,
    )
}

/// A repeating browser interval, cleared when dropped.
///
/// Clearing is idempotent, so a callback may stop its own interval through
/// [`IntervalHandle`] while the guard still owns the closure.
pub struct IntervalGuard {
    handle: IntervalHandle,
    _closure: Closure<dyn FnMut()>,
}

/// Cheap copyable id used to cancel an interval from inside its own callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalHandle(i32);

impl IntervalHandle {
    pub fn cancel(self) {
        if let Some(win) = web_sys::window() {
            win.clear_interval_with_handle(self.0);
        }
    }
}

impl IntervalGuard {
    /// Start calling `tick` every `period_ms`.
    ///
    /// # Errors
    /// Returns an error if the interval cannot be registered.
    pub fn start(period_ms: u32, tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        let closure = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        let id = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            timeout,
        )?;
        Ok(Self {
            handle: IntervalHandle(id),
            _closure: closure,
        })
    }

    #[must_use]
    pub const fn handle(&self) -> IntervalHandle {
        self.handle
    }
}

impl Drop for IntervalGuard {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}
