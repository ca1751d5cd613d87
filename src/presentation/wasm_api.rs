//! Host-facing exports. Thin bridge: decode JS values, call the overlay,
//! turn errors into JS strings.

use crate::application::ChartOverlay;
use crate::domain::{
    chart::{ChartConfig, PricePrecision},
    errors::{OverlayError, OverlayResult},
    logging::{LogComponent, LogLevel, Logger, get_logger},
    market_data::{Price, Timestamp, generate_renko_series, parse_bars, parse_raw_bar, parse_raw_markers},
    overlay::{LabelDirection, LabelId},
};
use crate::infrastructure::{
    DomLabelFactory, HostCallbackSink, LightweightChartsSurface,
    events::{RESIZE_EVENT, VIEW_CHANGE_EVENTS, WindowEventListenerHandle, window_event_listener},
    js_error,
    lightweight_charts::{to_js, window, window_size},
};
use crate::log_debug;
use chrono::Local;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

type BrowserOverlay = ChartOverlay<LightweightChartsSurface, DomLabelFactory>;

struct Session {
    overlay: Rc<RefCell<BrowserOverlay>>,
    listeners: Vec<WindowEventListenerHandle>,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    static HOST_LOGGER: RefCell<Option<js_sys::Function>> = const { RefCell::new(None) };
}

fn to_js_error(error: OverlayError) -> JsValue {
    get_logger().error(LogComponent::Presentation("WasmApi"), &error.to_string());
    JsValue::from_str(&error.to_string())
}

fn with_overlay<R>(f: impl FnOnce(&mut BrowserOverlay) -> OverlayResult<R>) -> Result<R, JsValue> {
    let overlay = SESSION
        .with(|session| session.borrow().as_ref().map(|s| Rc::clone(&s.overlay)))
        .ok_or_else(|| to_js_error(OverlayError::NotInitialized))?;
    let mut overlay = overlay
        .try_borrow_mut()
        .map_err(|_| to_js_error(OverlayError::Dom("overlay is busy".into())))?;
    f(&mut overlay).map_err(to_js_error)
}

/// Payloads arrive either as JSON text or as plain JS values.
fn payload_text(value: &JsValue) -> OverlayResult<String> {
    match value.as_string() {
        Some(text) => Ok(text),
        None => js_sys::JSON::stringify(value).map(String::from).map_err(|e| js_error("JSON.stringify", e)),
    }
}

/// Integer ids become their decimal string so `7` and `"7"` name the same label.
fn label_id(value: &JsValue) -> OverlayResult<LabelId> {
    if let Some(number) = value.as_f64() {
        if number.fract() == 0.0 && number.is_finite() {
            return Ok(LabelId::from(number as i64));
        }
    }
    payload_text(value).map(LabelId::from)
}

fn host_sink(callback: js_sys::Function) -> Box<HostCallbackSink> {
    Box::new(HostCallbackSink::new(callback))
}

fn listen(overlay: &Rc<RefCell<BrowserOverlay>>, config: ChartConfig) -> OverlayResult<Vec<WindowEventListenerHandle>> {
    let mut listeners = Vec::with_capacity(VIEW_CHANGE_EVENTS.len() + 1);
    if let Err(e) = register(overlay, config, &mut listeners) {
        for listener in listeners {
            listener.remove();
        }
        return Err(e);
    }
    Ok(listeners)
}

fn register(
    overlay: &Rc<RefCell<BrowserOverlay>>,
    config: ChartConfig,
    listeners: &mut Vec<WindowEventListenerHandle>,
) -> OverlayResult<()> {
    let resized = Rc::clone(overlay);
    listeners.push(window_event_listener(RESIZE_EVENT, move |_| {
        let Ok(window) = window() else { return };
        let (width, height) = window_size(&window);
        let (width, height) = config.chart_size(width, height);
        if let Ok(mut overlay) = resized.try_borrow_mut() {
            overlay.resize(width, height);
        }
    })?);

    for event in VIEW_CHANGE_EVENTS {
        let moved = Rc::clone(overlay);
        listeners.push(window_event_listener(event, move |_| {
            if let Ok(mut overlay) = moved.try_borrow_mut() {
                overlay.reposition_all();
            }
        })?);
    }
    Ok(())
}

/// Drop the listeners first so the session holds the last reference to
/// its overlay, then remove the chart from the page.
fn close(session: Session) {
    for listener in session.listeners {
        listener.remove();
    }
    match Rc::try_unwrap(session.overlay) {
        Ok(overlay) => overlay.into_inner().dispose(),
        Err(shared) => {
            get_logger().warn(LogComponent::Presentation("WasmApi"), "previous chart still referenced, clearing labels only");
            if let Ok(mut overlay) = shared.try_borrow_mut() {
                overlay.remove_all_labels();
            }
        }
    }
}

/// Create the chart in the page body and start tracking view changes.
/// Calling it again removes the previous chart with its listeners and labels.
#[wasm_bindgen(js_name = initializeChart)]
pub fn initialize_chart(config: JsValue) -> Result<(), JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        ChartConfig::default()
    } else {
        payload_text(&config).and_then(|text| ChartConfig::from_json(&text)).map_err(to_js_error)?
    };

    let settings = serde_json::to_string(&config).unwrap_or_default();
    let factory = DomLabelFactory::for_body().map_err(to_js_error)?;
    let mut overlay = BrowserOverlay::initialize_chart(&config, factory).map_err(to_js_error)?;
    if let Some(callback) = HOST_LOGGER.with(|logger| logger.borrow().clone()) {
        overlay.set_diagnostic_sink(host_sink(callback));
    }
    let overlay = Rc::new(RefCell::new(overlay));
    let listeners = listen(&overlay, config).map_err(to_js_error)?;

    let previous = SESSION.with(|session| session.borrow_mut().replace(Session { overlay, listeners }));
    if let Some(previous) = previous {
        close(previous);
    }

    get_logger().log_with_metadata(LogLevel::Info, LogComponent::Presentation("WasmApi"), "chart initialized", &settings);
    Ok(())
}

#[wasm_bindgen(js_name = setInitialData)]
pub fn set_initial_data(data: JsValue) -> Result<(), JsValue> {
    with_overlay(|overlay| {
        let bars = parse_bars(&payload_text(&data)?)?;
        overlay.set_initial_data(&bars)
    })
}

#[wasm_bindgen(js_name = appendData)]
pub fn append_data(bar: JsValue) -> Result<(), JsValue> {
    with_overlay(|overlay| {
        let raw = parse_raw_bar(&payload_text(&bar)?)?;
        let bar = overlay.append_bar(raw)?;
        log_debug!(LogComponent::Presentation("WasmApi"), "bar appended at {:?}", bar.time);
        Ok(())
    })
}

#[wasm_bindgen(js_name = changePrecision)]
pub fn change_precision(precision: u8) -> Result<(), JsValue> {
    with_overlay(|overlay| overlay.set_precision(PricePrecision::new(precision)))
}

#[wasm_bindgen(js_name = setMarkers)]
pub fn set_markers(markers: JsValue) -> Result<(), JsValue> {
    with_overlay(|overlay| {
        let raw = parse_raw_markers(&payload_text(&markers)?)?;
        overlay.set_markers(raw).map(|_| ())
    })
}

#[wasm_bindgen(js_name = updatePriceLine)]
pub fn update_price_line(price: f64) -> Result<(), JsValue> {
    with_overlay(|overlay| overlay.update_price_line(Price::from(price)))
}

/// `timestamp` is in milliseconds, as the host keeps it.
#[wasm_bindgen(js_name = addLabel)]
pub fn add_label(id: JsValue, price: f64, timestamp: f64, text: String, direction: String) -> Result<(), JsValue> {
    with_overlay(|overlay| {
        let id = label_id(&id)?;
        let direction = LabelDirection::from_host(&direction);
        if direction == LabelDirection::Unrecognized {
            get_logger().warn(
                LogComponent::Presentation("WasmApi"),
                &format!("label {} has unknown direction, drawn as sell", id),
            );
        }
        let timestamp = Timestamp::from_millis(timestamp.max(0.0) as u64);
        overlay.add_label(id, Price::from(price), timestamp, &text, direction)
    })
}

#[wasm_bindgen(js_name = removeLabel)]
pub fn remove_label(id: JsValue) -> Result<(), JsValue> {
    with_overlay(|overlay| overlay.remove_label(&label_id(&id)?))
}

#[wasm_bindgen(js_name = removeLabels)]
pub fn remove_labels() -> Result<(), JsValue> {
    with_overlay(|overlay| {
        overlay.remove_all_labels();
        Ok(())
    })
}

/// Route overlay diagnostics to a host function taking one string.
#[wasm_bindgen(js_name = setHostLogger)]
pub fn set_host_logger(callback: js_sys::Function) {
    HOST_LOGGER.with(|logger| *logger.borrow_mut() = Some(callback.clone()));
    let overlay = SESSION.with(|session| session.borrow().as_ref().map(|s| Rc::clone(&s.overlay)));
    if let Some(overlay) = overlay {
        if let Ok(mut overlay) = overlay.try_borrow_mut() {
            overlay.set_diagnostic_sink(host_sink(callback));
        }
    }
}

/// Synthetic Renko bars with business-day times starting today.
#[wasm_bindgen(js_name = generateRenkoData)]
pub fn generate_renko_data(items: usize) -> Result<JsValue, JsValue> {
    let bars = generate_renko_series(items, Local::now().date_naive(), &mut rand::thread_rng());
    to_js(&bars).map_err(to_js_error)
}
