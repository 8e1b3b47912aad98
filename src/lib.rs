//! `itrf-extrap` library crate.
//!
//! Computes ITRF station coordinates at an arbitrary epoch by combining:
//!
//! - linear extrapolation from an SSC coordinates/velocities catalog
//! - accumulated post-seismic deformation (PSD) corrections, evaluated in
//!   the local East/North/Up frame and rotated into Cartesian
//!
//! The binary (`itrf`) is a thin wrapper around this library so that core
//! logic is testable without spawning processes and the modules stay
//! reusable from other tools.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod time;
