//! Command-line parsing for the ITRF extrapolation tool.
//!
//! Argument parsing stays separate from the readers/transform code; the
//! arguments are resolved into an `ExtrapolationConfig` in `app`.

use std::path::PathBuf;

use clap::Parser;

/// Extrapolate ITRF station coordinates to an arbitrary epoch, applying
/// post-seismic deformation corrections when a PSD catalog is supplied.
#[derive(Debug, Parser)]
#[command(name = "itrf", version, about = "ITRF coordinate extrapolation with PSD corrections")]
pub struct Cli {
    /// SSC station coordinates/velocities catalog (e.g. ITRF2014_GNSS.SSC.txt).
    #[arg(long)]
    pub ssc: PathBuf,

    /// PSD catalog (e.g. ITRF2014-psd-gnss.dat). Without it the run is pure
    /// linear extrapolation.
    #[arg(long)]
    pub psd: Option<PathBuf>,

    /// Query epoch as 'YYYY:DDD' or 'YYYY:DDD:SSSSS' (day of year, seconds of day).
    #[arg(long)]
    pub epoch: String,

    /// Station 4-char id to extrapolate (repeatable).
    #[arg(short = 's', long = "station")]
    pub station: Vec<String>,

    /// Station DOMES number to extrapolate (repeatable).
    #[arg(short = 'd', long = "domes")]
    pub domes: Vec<String>,

    /// Export per-station results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full solution set (frame + intermediates) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}
