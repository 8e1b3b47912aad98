//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built during a single catalog scan and queried in-memory
//! - exported to CSV/JSON
//! - printed by the report layer without recomputation

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::ParametricModel;
use crate::time::Epoch;

/// Reference frame metadata from an SSC header line.
///
/// `reference_epoch` is the instant the catalog positions and velocities are
/// defined at (January 1st of the header's epoch year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    pub name: String,
    pub reference_epoch: Epoch,
}

/// One two-line SSC station record.
///
/// A catalog may carry several records for the same station (re-occupations)
/// with disjoint validity intervals; queries select the record whose interval
/// contains the query epoch. Open-ended records span
/// `[Epoch::MIN, Epoch::MAX)`.
///
/// Positions are meters at the reference epoch, velocities meters/year.
/// Sigma fields are parsed for completeness; nothing downstream consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// 9-character DOMES site identifier.
    pub domes: String,
    /// Free-text station name.
    pub name: String,
    /// Technique qualifier (e.g. "GNSS").
    pub tqn: String,
    /// 4-character station id.
    pub id: String,
    pub valid_from: Epoch,
    pub valid_until: Epoch,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub sx: f64,
    pub sy: f64,
    pub sz: f64,
    pub svx: f64,
    pub svy: f64,
    pub svz: f64,
}

impl StationRecord {
    /// Half-open validity containment, as both ITRF reader lineages use.
    pub fn contains(&self, t: Epoch) -> bool {
        t >= self.valid_from && t < self.valid_until
    }
}

/// One three-line PSD catalog record: a seismic event with one deformation
/// model per local component. The East/North/Up models always come from a
/// contiguous E/N/U line triplet in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeEvent {
    /// 4-character station id.
    pub id: String,
    /// 9-character DOMES site identifier.
    pub domes: String,
    /// Instant of the earthquake.
    pub epoch: Epoch,
    pub east: ParametricModel,
    pub north: ParametricModel,
    pub up: ParametricModel,
}

/// How a requested station is identified.
///
/// A query matches by exactly one of the two keys, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationSelector {
    /// 4-character station id (case-insensitive; normalized to upper case).
    Id(String),
    /// 9-character DOMES number (exact).
    Domes(String),
}

impl StationSelector {
    pub fn id(s: &str) -> Self {
        StationSelector::Id(s.trim().to_ascii_uppercase())
    }

    pub fn domes(s: &str) -> Self {
        StationSelector::Domes(s.trim().to_string())
    }

    /// Does this selector match the given (id, domes) pair?
    pub fn matches(&self, id: &str, domes: &str) -> bool {
        match self {
            StationSelector::Id(want) => id.trim().eq_ignore_ascii_case(want),
            StationSelector::Domes(want) => domes.trim() == want,
        }
    }

    /// The raw requested key, for reporting unmatched requests.
    pub fn key(&self) -> &str {
        match self {
            StationSelector::Id(s) | StationSelector::Domes(s) => s,
        }
    }
}

impl std::fmt::Display for StationSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationSelector::Id(s) => write!(f, "id:{s}"),
            StationSelector::Domes(s) => write!(f, "domes:{s}"),
        }
    }
}

/// Resolved run configuration (built from CLI arguments in `app`).
///
/// The query epoch is always explicit here; the core never defaults to the
/// process start time.
#[derive(Debug, Clone)]
pub struct ExtrapolationConfig {
    pub ssc_path: PathBuf,
    /// Optional: without a PSD catalog the run is pure linear extrapolation.
    pub psd_path: Option<PathBuf>,
    pub epoch: Epoch,
    pub selectors: Vec<StationSelector>,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// A station position linearly extrapolated to the query epoch, before any
/// PSD correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselinePosition {
    pub id: String,
    pub domes: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Accumulated PSD correction for one station, in local topocentric
/// components (millimeters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnuCorrection {
    pub id: String,
    pub domes: String,
    /// Number of seismic events that contributed.
    pub events: usize,
    pub east_mm: f64,
    pub north_mm: f64,
    pub up_mm: f64,
}

impl EnuCorrection {
    /// Zero correction carrying the originally requested identifiers.
    pub fn zero(id: impl Into<String>, domes: impl Into<String>) -> Self {
        EnuCorrection {
            id: id.into(),
            domes: domes.into(),
            events: 0,
            east_mm: 0.0,
            north_mm: 0.0,
            up_mm: 0.0,
        }
    }
}

/// Full per-station output of one extrapolation run, keeping the
/// intermediate quantities for reporting and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSolution {
    pub id: String,
    pub domes: String,
    /// Epoch the coordinates are valid at.
    pub epoch: Epoch,
    /// Linear-model position at the query epoch (m).
    pub baseline: [f64; 3],
    /// Summed PSD correction in local components (mm).
    pub psd_enu_mm: [f64; 3],
    /// The same correction rotated to a Cartesian displacement (m).
    pub psd_xyz_m: [f64; 3],
    /// Final coordinates: baseline + displacement (m).
    pub position: [f64; 3],
    /// Number of PSD events applied.
    pub psd_events: usize,
}
