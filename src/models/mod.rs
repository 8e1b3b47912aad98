//! Parametric post-seismic deformation models.
//!
//! Models are a small closed enum with pure evaluation, so the catalog
//! readers and the pipeline can stay generic over the five families.

pub mod model;

pub use model::*;
