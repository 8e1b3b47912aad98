//! Geodetic math: ellipsoid transforms and local-frame rotation.

pub mod geodetic;
pub mod rotation;

pub use geodetic::*;
pub use rotation::*;
