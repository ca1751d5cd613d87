use crate::domain::market_data::{Price, UnixSeconds};
use crate::domain::overlay::LabelId;
use strum::{AsRefStr, Display as StrumDisplay};
use thiserror::Error;

/// Which host payload failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr)]
pub enum PayloadKind {
    #[strum(serialize = "bar")]
    Bar,
    #[strum(serialize = "bar series")]
    BarSeries,
    #[strum(serialize = "marker list")]
    Markers,
    #[strum(serialize = "chart config")]
    Config,
}

/// Errors surfaced by the overlay and its adapters.
///
/// Every variant is local to a single call; the operation that returns it
/// leaves previously committed state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayError {
    #[error("malformed {kind} payload: {message}")]
    Parse { kind: PayloadKind, message: String },

    #[error("label {0} not found")]
    LabelNotFound(LabelId),

    #[error("no chart coordinate for price {price} at time {time}")]
    CoordinateUndefined { price: Price, time: UnixSeconds },

    #[error("invalid brick size {0}")]
    InvalidBrickSize(f64),

    #[error("chart surface rejected the call: {0}")]
    Surface(String),

    #[error("chart is not initialized")]
    NotInitialized,

    #[error("browser API failure: {0}")]
    Dom(String),
}

impl OverlayError {
    pub fn parse(kind: PayloadKind, error: serde_json::Error) -> Self {
        Self::Parse { kind, message: error.to_string() }
    }
}

pub type OverlayResult<T> = Result<T, OverlayError>;
