use derive_more::{Constructor, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Value Object - Viewport, the visible time/price window in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub start_time: f64,
    pub end_time: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: 0.0,
            min_price: 0.0,
            max_price: 100.0,
            width: 800,
            height: 600,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ..Default::default() }
    }

    pub fn time_range(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn price_range(&self) -> f64 {
        self.max_price - self.min_price
    }

    pub fn zoom(&mut self, factor: f64, center_x: f64) {
        let current_range = self.time_range();
        let new_range = current_range / factor;
        let center_time = self.start_time + current_range * center_x;

        self.start_time = center_time - new_range / 2.0;
        self.end_time = center_time + new_range / 2.0;
    }

    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        let time_delta = self.time_range() * delta_x;
        self.start_time += time_delta;
        self.end_time += time_delta;

        let price_delta = self.price_range() * delta_y;
        self.min_price += price_delta;
        self.max_price += price_delta;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Screen X for a timestamp, `None` outside the visible time window.
    pub fn time_to_x(&self, timestamp: f64) -> Option<f64> {
        if self.time_range() <= 0.0 || timestamp < self.start_time || timestamp > self.end_time {
            return None;
        }
        let normalized = (timestamp - self.start_time) / self.time_range();
        Some(normalized * self.width as f64)
    }

    /// Screen Y for a price, inverted so higher prices sit nearer the top.
    pub fn price_to_y(&self, price: f64) -> Option<f64> {
        if self.price_range() <= 0.0 {
            return None;
        }
        let normalized = (price - self.min_price) / self.price_range();
        Some(self.height as f64 * (1.0 - normalized))
    }
}

/// Rendered size of a label element in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Constructor)]
pub struct ElementSize {
    pub width: f64,
    pub height: f64,
}

/// Top-left corner of a label, CSS pixels relative to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Constructor)]
pub struct ScreenPosition {
    pub top: i32,
    pub left: i32,
}

/// Number of decimals shown for prices on the axis and crosshair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From, Into, Serialize, Deserialize)]
pub struct PricePrecision(u8);

impl PricePrecision {
    pub const DEFAULT: PricePrecision = PricePrecision(8);

    pub fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    pub fn decimals(&self) -> u8 {
        self.0
    }

    pub fn format(&self, price: f64) -> String {
        format!("{:.*}", self.0 as usize, price)
    }
}

impl Default for PricePrecision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_precision_formats_fixed_decimals() {
        assert_eq!(PricePrecision::DEFAULT.format(1.5), "1.50000000");
        assert_eq!(PricePrecision::new(2).format(1.005), "1.00");
        assert_eq!(PricePrecision::new(0).format(99.6), "100");
    }

    #[test]
    fn price_above_the_window_projects_above_the_top() {
        let vp = Viewport { start_time: 0.0, end_time: 10.0, min_price: 0.0, max_price: 100.0, width: 100, height: 100 };
        assert_eq!(vp.price_to_y(150.0), Some(-50.0));
    }
}
