use super::js_error;
use crate::domain::errors::{OverlayError, OverlayResult};
use crate::domain::logging::{LogComponent, Logger, get_logger};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event};

/// Window events after which label positions may be stale
pub const VIEW_CHANGE_EVENTS: [&str; 2] = ["mousemove", "wheel"];
pub const RESIZE_EVENT: &str = "resize";

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
    pub once: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false, once: false }
    }
}

/// Keeps the listener's closure alive; dropping it without `remove` leaves a
/// dangling callback registered on the window.
pub struct WindowEventListenerHandle {
    event_name: String,
    callback: Closure<dyn FnMut(Event)>,
    capture: bool,
}

impl WindowEventListenerHandle {
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn remove(self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.remove_event_listener_with_callback_and_bool(
            &self.event_name,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        ) {
            get_logger().warn(
                LogComponent::Infrastructure("Events"),
                &format!("{} listener not removed: {:?}", self.event_name, e),
            );
        }
    }
}

pub fn window_event_listener_with_options(
    event_name: &str,
    options: &EventOptions,
    mut cb: impl FnMut(Event) + 'static,
) -> OverlayResult<WindowEventListenerHandle> {
    let window = web_sys::window().ok_or_else(|| OverlayError::Dom("window not available".into()))?;

    let opts = AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_capture(options.capture);
    opts.set_once(options.once);

    let callback = Closure::wrap(Box::new(move |ev: Event| cb(ev)) as Box<dyn FnMut(Event)>);
    window
        .add_event_listener_with_callback_and_add_event_listener_options(
            event_name,
            callback.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(|e| js_error(event_name, e))?;

    Ok(WindowEventListenerHandle { event_name: event_name.to_string(), callback, capture: options.capture })
}

pub fn window_event_listener(
    event_name: &str,
    cb: impl FnMut(Event) + 'static,
) -> OverlayResult<WindowEventListenerHandle> {
    window_event_listener_with_options(event_name, &EventOptions::default(), cb)
}
