use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;

/// Value Object - Price
#[derive(Debug, Clone, Copy, PartialEq, Display, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - host timestamp, milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Constructor, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }

    /// Rescale to the chart's native unit. Sub-second precision is kept so
    /// bars a few milliseconds apart stay distinct.
    pub fn to_chart_seconds(&self) -> UnixSeconds {
        UnixSeconds(self.0 as f64 / 1000.0)
    }
}

/// Value Object - chart-native time, fractional seconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Into, Constructor, Deserialize)]
pub struct UnixSeconds(f64);

impl UnixSeconds {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Whole seconds go out as integers, the rest as floats.
impl Serialize for UnixSeconds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < i64::MAX as f64 {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

/// Bar time as the charting library accepts it: a UTC timestamp in seconds
/// or a `yyyy-mm-dd` business day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarTime {
    Seconds(UnixSeconds),
    BusinessDay(String),
}

impl BarTime {
    /// Order two bar times. Mixed representations are incomparable.
    pub fn compare(&self, other: &BarTime) -> Option<Ordering> {
        match (self, other) {
            (BarTime::Seconds(a), BarTime::Seconds(b)) => a.partial_cmp(b),
            // zero-padded ISO dates sort lexically
            (BarTime::BusinessDay(a), BarTime::BusinessDay(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<UnixSeconds> for BarTime {
    fn from(value: UnixSeconds) -> Self {
        BarTime::Seconds(value)
    }
}
