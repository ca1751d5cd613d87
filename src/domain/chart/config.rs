use super::value_objects::PricePrecision;
use crate::domain::errors::{OverlayError, OverlayResult, PayloadKind};
use crate::domain::market_data::Price;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum CrosshairMode {
    #[default]
    Normal,
    Magnet,
}

impl CrosshairMode {
    /// Numeric value of the library's `CrosshairMode` enum
    pub fn library_value(self) -> u8 {
        match self {
            CrosshairMode::Normal => 0,
            CrosshairMode::Magnet => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    Solid,
    Dotted,
    Dashed,
    LargeDashed,
    SparseDotted,
}

impl LineStyle {
    /// Numeric value of the library's `LineStyle` enum
    pub fn library_value(self) -> u8 {
        match self {
            LineStyle::Solid => 0,
            LineStyle::Dotted => 1,
            LineStyle::Dashed => 2,
            LineStyle::LargeDashed => 3,
            LineStyle::SparseDotted => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandleStyle {
    pub up_color: String,
    pub down_color: String,
    pub border_up_color: String,
    pub border_down_color: String,
    pub wick_up_color: String,
    pub wick_down_color: String,
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            up_color: "#00ff00".into(),
            down_color: "#ff0000".into(),
            border_up_color: "rgba(255, 144, 0, 1)".into(),
            border_down_color: "rgba(255, 144, 0, 1)".into(),
            wick_up_color: "#11ee11".into(),
            wick_down_color: "#ee1111".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceLineStyle {
    pub color: String,
    pub line_width: u8,
    pub line_style: LineStyle,
    pub axis_label_visible: bool,
    pub title: String,
}

impl Default for PriceLineStyle {
    fn default() -> Self {
        Self {
            color: "green".into(),
            line_width: 2,
            line_style: LineStyle::Dotted,
            axis_label_visible: true,
            title: String::new(),
        }
    }
}

/// Static chart appearance. Only `price_precision` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    pub background_color: String,
    pub text_color: String,
    pub grid_color: String,
    pub border_color: String,
    pub crosshair_mode: CrosshairMode,
    pub locale: String,
    pub date_format: String,
    /// Gap kept between the chart and the window edges, px
    pub window_inset: f64,
    pub price_precision: PricePrecision,
    pub candles: CandleStyle,
    pub price_line: PriceLineStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".into(),
            text_color: "#000000".into(),
            grid_color: "rgba(197, 203, 206, 0.5)".into(),
            border_color: "rgba(197, 203, 206, 0.8)".into(),
            crosshair_mode: CrosshairMode::Normal,
            locale: "en-US".into(),
            date_format: "yyyy/MM/dd".into(),
            window_inset: 8.0,
            price_precision: PricePrecision::DEFAULT,
            candles: CandleStyle::default(),
            price_line: PriceLineStyle::default(),
        }
    }
}

impl ChartConfig {
    /// Parse a possibly partial host config; absent keys keep their defaults.
    pub fn from_json(text: &str) -> OverlayResult<Self> {
        serde_json::from_str(text).map_err(|e| OverlayError::parse(PayloadKind::Config, e))
    }

    /// Chart size for a window, never negative.
    pub fn chart_size(&self, window_width: f64, window_height: f64) -> (f64, f64) {
        ((window_width - self.window_inset).max(0.0), (window_height - self.window_inset).max(0.0))
    }

    /// Options object for `createChart`. Formatter callbacks are attached by
    /// the browser adapter.
    pub fn chart_options(&self, width: f64, height: f64) -> Value {
        json!({
            "width": width,
            "height": height,
            "layout": {
                "backgroundColor": self.background_color,
                "textColor": self.text_color,
            },
            "grid": {
                "vertLines": { "color": self.grid_color },
                "horzLines": { "color": self.grid_color },
            },
            "crosshair": { "mode": self.crosshair_mode.library_value() },
            "rightPriceScale": { "borderColor": self.border_color },
            "timeScale": { "borderColor": self.border_color },
            "localization": {
                "locale": self.locale,
                "dateFormat": self.date_format,
            },
        })
    }

    pub fn series_options(&self) -> Value {
        serde_json::to_value(&self.candles).unwrap_or(Value::Null)
    }

    pub fn price_line_options(&self, price: Price) -> Value {
        json!({
            "price": price.value(),
            "color": self.price_line.color,
            "lineWidth": self.price_line.line_width,
            "lineStyle": self.price_line.line_style.library_value(),
            "axisLabelVisible": self.price_line.axis_label_visible,
            "title": self.price_line.title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ChartConfig::from_json(r##"{"textColor":"#333333","candles":{"upColor":"blue"}}"##).unwrap();
        assert_eq!(config.text_color, "#333333");
        assert_eq!(config.candles.up_color, "blue");
        assert_eq!(config.candles.down_color, "#ff0000");
        assert_eq!(config.price_precision, PricePrecision::DEFAULT);
    }

    #[test]
    fn chart_size_subtracts_inset() {
        let config = ChartConfig::default();
        assert_eq!(config.chart_size(1024.0, 768.0), (1016.0, 760.0));
        assert_eq!(config.chart_size(4.0, 4.0), (0.0, 0.0));
    }

    #[test]
    fn price_line_options_use_library_enums() {
        let options = ChartConfig::default().price_line_options(Price::from(101.5));
        assert_eq!(options["price"], 101.5);
        assert_eq!(options["lineStyle"], 1);
        assert_eq!(options["lineWidth"], 2);
        assert_eq!(options["axisLabelVisible"], true);
    }
}
