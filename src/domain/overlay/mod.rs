//! Overlay aggregate: labels, their placement rule and the rendering ports.

pub mod label;
pub mod placement;
pub mod ports;

pub use label::*;
pub use placement::*;
pub use ports::*;
