//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - catalog records (`ReferenceFrame`, `StationRecord`, `EarthquakeEvent`)
//! - query inputs (`StationSelector`, `ExtrapolationConfig`)
//! - pipeline outputs (`EnuCorrection`, `StationSolution`)

pub mod types;

pub use types::*;
