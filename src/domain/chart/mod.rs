//! Chart aggregate: the surface port, its configuration and value objects.

pub mod config;
pub mod surface;
pub mod value_objects;

pub use config::*;
pub use surface::*;
pub use value_objects::*;
