//! Market data aggregate: bars, markers, host payloads and Renko bricks.

pub mod entities;
pub mod payload;
pub mod renko;
pub mod value_objects;

pub use entities::*;
pub use payload::*;
pub use renko::*;
pub use value_objects::*;
