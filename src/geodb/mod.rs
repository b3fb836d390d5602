pub mod probe;

pub use probe::{health_check, GeodbProbe};
