//! Formatted terminal output for extrapolation runs.
//!
//! We keep formatting code in one place so:
//! - the readers/transform code stays clean and testable
//! - output changes are localized

use crate::domain::{ReferenceFrame, StationSelector, StationSolution};

/// Format the full run report: frame info, the coordinate table, the PSD
/// detail lines, and any unmatched requests.
pub fn format_run_summary(
    frame: &ReferenceFrame,
    solutions: &[StationSolution],
    unmatched: &[StationSelector],
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Frame: {} (reference epoch {})\n\n",
        frame.name, frame.reference_epoch
    ));

    out.push_str(
        "NAME   DOMES          X(m)            Y(m)            Z(m)       EPOCH\n",
    );
    out.push_str(
        "---- --------- --------------- --------------- --------------- -------------------\n",
    );
    for s in solutions {
        out.push_str(&format!(
            "{:<4} {:<9} {:>15.5} {:>15.5} {:>15.5} {}\n",
            s.id, s.domes, s.position[0], s.position[1], s.position[2], s.epoch
        ));
    }

    let with_psd: Vec<&StationSolution> = solutions.iter().filter(|s| s.psd_events > 0).collect();
    if !with_psd.is_empty() {
        out.push_str("\nPost-seismic deformation applied:\n");
        for s in with_psd {
            out.push_str(&format!(
                "{:<4} {:<9} events={} enu=({:.3}, {:.3}, {:.3}) mm  dxyz=({:.6}, {:.6}, {:.6}) m\n",
                s.id,
                s.domes,
                s.psd_events,
                s.psd_enu_mm[0],
                s.psd_enu_mm[1],
                s.psd_enu_mm[2],
                s.psd_xyz_m[0],
                s.psd_xyz_m[1],
                s.psd_xyz_m[2],
            ));
        }
    }

    if !unmatched.is_empty() {
        out.push_str("\nNot found in the SSC catalog (or outside validity):\n");
        for sel in unmatched {
            out.push_str(&format!("- {sel}\n"));
        }
    }

    out
}
