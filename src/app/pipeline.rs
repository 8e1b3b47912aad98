//! The extrapolation pipeline shared by the CLI and by library callers.
//!
//! One run is:
//!
//! SSC header → SSC query (baseline positions at the query epoch) →
//! per-station PSD accumulation → ENU→ECEF rotation at the baseline →
//! final coordinates
//!
//! The reference epoch comes from the SSC header and is threaded explicitly
//! into the extrapolation; the PSD correction is rotated at the *baseline*
//! position, not the reference-epoch position.

use crate::domain::{
    BaselinePosition, EnuCorrection, ExtrapolationConfig, ReferenceFrame, StationSelector,
    StationSolution,
};
use crate::error::ItrfError;
use crate::io::{accumulate_psd_file, extrapolate_ssc_file};
use crate::math::{enu_to_cartesian, Ellipsoid};

/// Millimeters to meters.
const MM_TO_M: f64 = 1e-3;

/// All computed outputs of one extrapolation run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub frame: ReferenceFrame,
    pub solutions: Vec<StationSolution>,
    /// Requests with no baseline record (unknown id/domes, or validity
    /// interval excluding the query epoch).
    pub unmatched: Vec<StationSelector>,
}

/// Execute the full pipeline for the given configuration.
pub fn run_extrapolation(config: &ExtrapolationConfig) -> Result<RunOutput, ItrfError> {
    if config.selectors.is_empty() {
        return Err(ItrfError::usage(
            "No stations requested: pass at least one --station or --domes.",
        ));
    }

    // 1) Baseline positions from the SSC catalog; the reference epoch is the
    //    one parsed from the header.
    let (frame, baselines) = extrapolate_ssc_file(&config.ssc_path, &config.selectors, config.epoch)?;

    let unmatched: Vec<StationSelector> = config
        .selectors
        .iter()
        .filter(|sel| !baselines.iter().any(|b| sel.matches(&b.id, &b.domes)))
        .cloned()
        .collect();

    // 2) PSD correction per matched station, applied at the baseline.
    let mut solutions = Vec::with_capacity(baselines.len());
    for baseline in &baselines {
        let correction = match &config.psd_path {
            Some(psd_path) => {
                let selector = psd_selector_for(baseline, &config.selectors);
                accumulate_psd_file(psd_path, config.epoch, &selector)?
            }
            None => EnuCorrection::zero(baseline.id.clone(), baseline.domes.clone()),
        };
        solutions.push(apply_correction(baseline, &correction, config)?);
    }

    Ok(RunOutput {
        frame,
        solutions,
        unmatched,
    })
}

/// PSD queries match by exactly one key: the one the station was originally
/// requested with. Falls back to the 4-char id when the selector is gone
/// (cannot happen for baselines produced by the SSC query, but keeps this
/// total).
fn psd_selector_for(
    baseline: &BaselinePosition,
    selectors: &[StationSelector],
) -> StationSelector {
    selectors
        .iter()
        .find(|sel| sel.matches(&baseline.id, &baseline.domes))
        .map(|sel| match sel {
            StationSelector::Id(_) => StationSelector::id(&baseline.id),
            StationSelector::Domes(_) => StationSelector::domes(&baseline.domes),
        })
        .unwrap_or_else(|| StationSelector::id(&baseline.id))
}

/// Rotate the summed local correction into a Cartesian displacement at the
/// baseline position and add it.
fn apply_correction(
    baseline: &BaselinePosition,
    correction: &EnuCorrection,
    config: &ExtrapolationConfig,
) -> Result<StationSolution, ItrfError> {
    let [dx, dy, dz] = enu_to_cartesian(
        correction.east_mm * MM_TO_M,
        correction.north_mm * MM_TO_M,
        correction.up_mm * MM_TO_M,
        baseline.x,
        baseline.y,
        baseline.z,
        &Ellipsoid::GRS80,
    );

    Ok(StationSolution {
        id: baseline.id.clone(),
        domes: baseline.domes.clone(),
        epoch: config.epoch,
        baseline: [baseline.x, baseline.y, baseline.z],
        psd_enu_mm: [correction.east_mm, correction.north_mm, correction.up_mm],
        psd_xyz_m: [dx, dy, dz],
        position: [baseline.x + dx, baseline.y + dy, baseline.z + dz],
        psd_events: correction.events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Epoch;
    use std::fs;
    use std::path::PathBuf;

    fn write_fixture(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("itrf_extrap_{name}"));
        fs::write(&path, content).unwrap();
        path
    }

    fn ssc_fixture() -> String {
        let mut s = String::new();
        s.push_str("ITRF2005 STATION POSITIONS AT EPOCH 2005.0 AND VELOCITIES\n");
        for i in 1..=6 {
            s.push_str(&format!("description line {i}\n"));
        }
        s.push_str("10002M006 Grasse (OCA)     GNSS GRAS  4581690.0000   556114.0000  4389360.0000 0.0010 0.0010 0.0010\n");
        s.push_str("10002M006                              0.0100  -0.0050   0.0200 0.0001 0.0001 0.0001\n");
        s
    }

    fn psd_fixture() -> String {
        // One EXP event per component for GRAS, dated 2 years before the
        // query epoch used in the tests.
        let mut s = String::new();
        s.push_str(" GRAS  A 10002M006 05:001:00000 E 2   10.00  1.0000                     GPS\n");
        s.push_str("                                N 0\n");
        s.push_str("                                U 0\n");
        s
    }

    fn config(ssc: PathBuf, psd: Option<PathBuf>) -> ExtrapolationConfig {
        ExtrapolationConfig {
            ssc_path: ssc,
            psd_path: psd,
            // 730.5 days after 2005-01-01 = exactly 2.0 Julian years.
            epoch: Epoch::from_query_str("2007:001:43200").unwrap(),
            selectors: vec![StationSelector::id("GRAS")],
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn pure_linear_extrapolation_two_years() {
        let ssc = write_fixture("lin.ssc", &ssc_fixture());
        let out = run_extrapolation(&config(ssc.clone(), None)).unwrap();
        fs::remove_file(&ssc).ok();

        assert_eq!(out.frame.name, "ITRF2005");
        assert_eq!(out.solutions.len(), 1);
        assert!(out.unmatched.is_empty());
        let s = &out.solutions[0];
        assert_eq!(s.id, "GRAS");
        assert!((s.position[0] - 4581690.02).abs() < 1e-9);
        assert!((s.position[1] - 556113.99).abs() < 1e-9);
        assert!((s.position[2] - 4389360.04).abs() < 1e-9);
        assert_eq!(s.psd_events, 0);
        assert_eq!(s.psd_xyz_m, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn psd_correction_is_rotated_at_the_baseline() {
        let ssc = write_fixture("psd.ssc", &ssc_fixture());
        let psd = write_fixture("psd.dat", &psd_fixture());
        let out = run_extrapolation(&config(ssc.clone(), Some(psd.clone()))).unwrap();
        fs::remove_file(&ssc).ok();
        fs::remove_file(&psd).ok();

        let s = &out.solutions[0];
        assert_eq!(s.psd_events, 1);
        // EXP(a1=10mm, t1=1yr) at dtq=2yr on East only.
        let east_mm = 10.0 * (1.0 - (-2.0f64).exp());
        assert!((s.psd_enu_mm[0] - east_mm).abs() < 1e-9);
        assert_eq!(s.psd_enu_mm[1], 0.0);
        assert_eq!(s.psd_enu_mm[2], 0.0);
        // The rotation preserves the displacement length.
        let len = (s.psd_xyz_m[0].powi(2) + s.psd_xyz_m[1].powi(2) + s.psd_xyz_m[2].powi(2)).sqrt();
        assert!((len - east_mm * 1e-3).abs() < 1e-12);
        // Final position = baseline + displacement.
        for i in 0..3 {
            assert!((s.position[i] - (s.baseline[i] + s.psd_xyz_m[i])).abs() < 1e-12);
        }
    }

    #[test]
    fn station_missing_from_psd_catalog_gets_zero_displacement() {
        let ssc = write_fixture("nopsd.ssc", &ssc_fixture());
        let psd = write_fixture("nopsd.dat", &psd_fixture().replace("GRAS", "COCO"));
        let out = run_extrapolation(&config(ssc.clone(), Some(psd.clone()))).unwrap();
        fs::remove_file(&ssc).ok();
        fs::remove_file(&psd).ok();

        let s = &out.solutions[0];
        assert_eq!(s.psd_events, 0);
        assert_eq!(s.psd_xyz_m, [0.0, 0.0, 0.0]);
        assert!((s.position[0] - 4581690.02).abs() < 1e-9);
    }

    #[test]
    fn unknown_station_is_reported_unmatched() {
        let ssc = write_fixture("unmatched.ssc", &ssc_fixture());
        let mut cfg = config(ssc.clone(), None);
        cfg.selectors.push(StationSelector::id("ZZZZ"));
        let out = run_extrapolation(&cfg).unwrap();
        fs::remove_file(&ssc).ok();

        assert_eq!(out.solutions.len(), 1);
        assert_eq!(out.unmatched, vec![StationSelector::id("ZZZZ")]);
    }

    #[test]
    fn empty_request_is_a_usage_error() {
        let ssc = write_fixture("empty.ssc", &ssc_fixture());
        let mut cfg = config(ssc.clone(), None);
        cfg.selectors.clear();
        let err = run_extrapolation(&cfg).unwrap_err();
        fs::remove_file(&ssc).ok();
        assert!(matches!(err, ItrfError::Usage { .. }));
    }
}
