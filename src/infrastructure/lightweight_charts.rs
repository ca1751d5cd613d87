//! Bindings to TradingView Lightweight Charts, loaded by the host page as the
//! global `LightweightCharts`.

use super::js_error;
use crate::domain::{
    chart::{ChartConfig, ChartSurface, PricePrecision},
    errors::{OverlayError, OverlayResult},
    logging::{LogComponent, Logger, get_logger},
    market_data::{Bar, Price, SeriesMarker, UnixSeconds},
};
use crate::time_utils::format_tick_mark;
use chrono::Local;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, Window};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = LightweightCharts, js_name = createChart, catch)]
    fn create_chart(container: &HtmlElement, options: &JsValue) -> Result<ChartApi, JsValue>;

    pub type ChartApi;

    #[wasm_bindgen(method, js_name = addCandlestickSeries)]
    fn add_candlestick_series(this: &ChartApi, options: &JsValue) -> SeriesApi;

    #[wasm_bindgen(method, js_name = timeScale)]
    fn time_scale(this: &ChartApi) -> TimeScaleApi;

    #[wasm_bindgen(method, js_name = applyOptions)]
    fn apply_options(this: &ChartApi, options: &JsValue);

    #[wasm_bindgen(method)]
    fn resize(this: &ChartApi, width: f64, height: f64);

    #[wasm_bindgen(method)]
    fn remove(this: &ChartApi);

    pub type SeriesApi;

    #[wasm_bindgen(method, js_name = setData, catch)]
    fn set_data(this: &SeriesApi, data: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn update(this: &SeriesApi, bar: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = setMarkers, catch)]
    fn set_markers(this: &SeriesApi, markers: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = createPriceLine, catch)]
    fn create_price_line(this: &SeriesApi, options: &JsValue) -> Result<PriceLineApi, JsValue>;

    #[wasm_bindgen(method, js_name = removePriceLine)]
    fn remove_price_line(this: &SeriesApi, line: &PriceLineApi);

    #[wasm_bindgen(method, js_name = priceToCoordinate)]
    fn price_to_coordinate(this: &SeriesApi, price: f64) -> Option<f64>;

    pub type TimeScaleApi;

    #[wasm_bindgen(method, js_name = timeToCoordinate)]
    fn time_to_coordinate(this: &TimeScaleApi, time: f64) -> Option<f64>;

    pub type PriceLineApi;
}

/// Serialize through JSON so the library receives plain objects
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> OverlayResult<JsValue> {
    let text = serde_json::to_string(value).map_err(|e| OverlayError::Surface(e.to_string()))?;
    js_sys::JSON::parse(&text).map_err(|e| js_error("JSON.parse", e))
}

fn set_path(target: &JsValue, path: &[&str], value: &JsValue) -> OverlayResult<()> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };
    let mut node = target.clone();
    for key in parents {
        let mut next = js_sys::Reflect::get(&node, &JsValue::from_str(key)).map_err(|e| js_error(key, e))?;
        if next.is_undefined() || next.is_null() {
            next = js_sys::Object::new().into();
            js_sys::Reflect::set(&node, &JsValue::from_str(key), &next).map_err(|e| js_error(key, e))?;
        }
        node = next;
    }
    js_sys::Reflect::set(&node, &JsValue::from_str(last), value).map_err(|e| js_error(last, e))?;
    Ok(())
}

/// `localization.priceFormatter` with fixed decimals
fn price_formatter(precision: PricePrecision) -> JsValue {
    Closure::<dyn Fn(f64) -> String>::new(move |price: f64| precision.format(price)).into_js_value()
}

/// `timeScale.tickMarkFormatter` as local `HH:MM:SS`; business days fall
/// back to the library's own formatting.
fn tick_mark_formatter() -> JsValue {
    Closure::<dyn Fn(JsValue) -> Option<String>>::new(|time: JsValue| {
        time.as_f64().and_then(|seconds| format_tick_mark(seconds as i64, &Local))
    })
    .into_js_value()
}

pub(crate) fn window() -> OverlayResult<Window> {
    web_sys::window().ok_or_else(|| OverlayError::Dom("window not available".into()))
}

pub(crate) fn window_size(window: &Window) -> (f64, f64) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

/// The library stacks several canvases per pane; lifting the crosshair and
/// axis layers of this chart keeps them above overlay labels.
fn raise_chart_canvases(container: &Element) -> OverlayResult<()> {
    let canvases = container.query_selector_all("canvas").map_err(|e| js_error("canvas lookup", e))?;
    for index in 2..=5u32 {
        let Some(canvas) = canvases.item(index).and_then(|node| node.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let z_index = if index % 2 == 0 { "11" } else { "12" };
        canvas.style().set_property("z-index", z_index).map_err(|e| js_error("z-index", e))?;
    }
    Ok(())
}

pub struct LightweightChartsSurface {
    container: HtmlElement,
    chart: ChartApi,
    series: SeriesApi,
    config: ChartConfig,
}

impl ChartSurface for LightweightChartsSurface {
    type PriceLine = PriceLineApi;

    fn create(config: &ChartConfig) -> OverlayResult<Self> {
        let window = window()?;
        let (window_width, window_height) = window_size(&window);
        let (width, height) = config.chart_size(window_width, window_height);
        let options = to_js(&config.chart_options(width, height))?;
        set_path(&options, &["timeScale", "tickMarkFormatter"], &tick_mark_formatter())?;
        set_path(&options, &["localization", "priceFormatter"], &price_formatter(config.price_precision))?;
        let series_options = to_js(&config.series_options())?;

        let document = window.document().ok_or_else(|| OverlayError::Dom("document not available".into()))?;
        let body = document.body().ok_or_else(|| OverlayError::Dom("document body not available".into()))?;
        let container: HtmlElement = document
            .create_element("div")
            .map_err(|e| js_error("chart container", e))?
            .dyn_into()
            .map_err(|_| OverlayError::Dom("div is not an HtmlElement".into()))?;
        body.append_child(&container).map_err(|e| js_error("append chart", e))?;

        let chart = match create_chart(&container, &options) {
            Ok(chart) => chart,
            Err(e) => {
                container.remove();
                return Err(js_error("createChart", e));
            }
        };
        let series = chart.add_candlestick_series(&series_options);
        if let Err(e) = raise_chart_canvases(&container) {
            get_logger().warn(LogComponent::Infrastructure("LightweightCharts"), &format!("canvas order unchanged: {}", e));
        }

        get_logger().info(
            LogComponent::Infrastructure("LightweightCharts"),
            &format!("chart created at {}x{}", width, height),
        );
        Ok(Self { container, chart, series, config: config.clone() })
    }

    fn price_to_coordinate(&self, price: Price) -> Option<f64> {
        self.series.price_to_coordinate(price.value())
    }

    fn time_to_coordinate(&self, time: UnixSeconds) -> Option<f64> {
        self.chart.time_scale().time_to_coordinate(time.value())
    }

    fn set_data(&mut self, bars: &[Bar]) -> OverlayResult<()> {
        let data = to_js(bars)?;
        self.series.set_data(&data).map_err(|e| surface_error("setData", e))
    }

    fn update_bar(&mut self, bar: &Bar) -> OverlayResult<()> {
        let bar = to_js(bar)?;
        self.series.update(&bar).map_err(|e| surface_error("update", e))
    }

    fn set_markers(&mut self, markers: &[SeriesMarker]) -> OverlayResult<()> {
        let markers = to_js(markers)?;
        self.series.set_markers(&markers).map_err(|e| surface_error("setMarkers", e))
    }

    fn set_price_precision(&mut self, precision: PricePrecision) -> OverlayResult<()> {
        let options: JsValue = js_sys::Object::new().into();
        set_path(&options, &["localization", "priceFormatter"], &price_formatter(precision))?;
        self.chart.apply_options(&options);
        Ok(())
    }

    fn create_price_line(&mut self, price: Price) -> OverlayResult<PriceLineApi> {
        let options = to_js(&self.config.price_line_options(price))?;
        self.series.create_price_line(&options).map_err(|e| surface_error("createPriceLine", e))
    }

    fn remove_price_line(&mut self, line: PriceLineApi) {
        self.series.remove_price_line(&line);
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.chart.resize(width, height);
    }

    fn destroy(self) {
        self.chart.remove();
        self.container.remove();
    }
}

fn surface_error(call: &str, error: JsValue) -> OverlayError {
    let detail = error
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| error.as_string())
        .unwrap_or_else(|| format!("{:?}", error));
    OverlayError::Surface(format!("{}: {}", call, detail))
}
