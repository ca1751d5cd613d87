//! Host payload decoding. Every parser is all-or-nothing: a malformed entry
//! rejects the whole payload.

use super::entities::{Bar, RawBar, RawMarker};
use crate::domain::errors::{OverlayError, OverlayResult, PayloadKind};

pub fn parse_raw_bar(text: &str) -> OverlayResult<RawBar> {
    serde_json::from_str(text).map_err(|e| OverlayError::parse(PayloadKind::Bar, e))
}

pub fn parse_bars(text: &str) -> OverlayResult<Vec<Bar>> {
    serde_json::from_str(text).map_err(|e| OverlayError::parse(PayloadKind::BarSeries, e))
}

pub fn parse_raw_markers(text: &str) -> OverlayResult<Vec<RawMarker>> {
    serde_json::from_str(text).map_err(|e| OverlayError::parse(PayloadKind::Markers, e))
}
