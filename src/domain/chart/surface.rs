use super::config::ChartConfig;
use super::value_objects::PricePrecision;
use crate::domain::errors::OverlayResult;
use crate::domain::market_data::{Bar, Price, SeriesMarker, UnixSeconds};

/// The charting library as seen by the overlay: a single price series with
/// coordinate conversion, native markers and price lines.
pub trait ChartSurface {
    /// Opaque handle of a created price line
    type PriceLine;

    /// Build the surface with the static visual configuration.
    fn create(config: &ChartConfig) -> OverlayResult<Self>
    where
        Self: Sized;

    /// Vertical pixel for a price, `None` when the series cannot map it yet.
    fn price_to_coordinate(&self, price: Price) -> Option<f64>;

    /// Horizontal pixel for a time, `None` outside the time scale's range.
    fn time_to_coordinate(&self, time: UnixSeconds) -> Option<f64>;

    fn set_data(&mut self, bars: &[Bar]) -> OverlayResult<()>;

    /// Update the latest bar when times match, append otherwise.
    fn update_bar(&mut self, bar: &Bar) -> OverlayResult<()>;

    fn set_markers(&mut self, markers: &[SeriesMarker]) -> OverlayResult<()>;

    fn set_price_precision(&mut self, precision: PricePrecision) -> OverlayResult<()>;

    fn create_price_line(&mut self, price: Price) -> OverlayResult<Self::PriceLine>;

    fn remove_price_line(&mut self, line: Self::PriceLine);

    fn resize(&mut self, width: f64, height: f64);

    /// Tear the chart down and detach it from the page
    fn destroy(self)
    where
        Self: Sized;
}
