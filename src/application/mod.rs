//! Application layer: the overlay service orchestrating the domain ports.

pub mod overlay;

pub use overlay::ChartOverlay;
