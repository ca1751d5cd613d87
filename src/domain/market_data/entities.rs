pub use super::value_objects::{BarTime, Price, Timestamp, UnixSeconds};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Domain entity - OHLC bar in chart time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: BarTime,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Bar {
    pub fn new(time: impl Into<BarTime>, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self { time: time.into(), open, high, low, close }
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Bar as pushed by the host, time in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub time: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl RawBar {
    pub fn into_bar(self) -> Bar {
        Bar {
            time: BarTime::Seconds(self.time.to_chart_seconds()),
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        }
    }
}

/// Where a native marker sits relative to its bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    AboveBar,
    BelowBar,
    InBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    Circle,
    Square,
    ArrowUp,
    ArrowDown,
}

/// Native series marker, drawn by the charting library itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMarker {
    pub time: UnixSeconds,
    pub position: MarkerPosition,
    pub color: String,
    pub shape: MarkerShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Marker descriptor as pushed by the host, time in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMarker {
    pub time: Timestamp,
    pub position: MarkerPosition,
    pub color: String,
    pub shape: MarkerShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl RawMarker {
    pub fn into_marker(self) -> SeriesMarker {
        SeriesMarker {
            time: self.time.to_chart_seconds(),
            position: self.position,
            color: self.color,
            shape: self.shape,
            text: self.text,
        }
    }
}
