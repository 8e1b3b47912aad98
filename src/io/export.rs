//! Export station solutions to CSV or JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON keeps the full solution structure (baseline, ENU
//! correction, Cartesian displacement) for programmatic use.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{ReferenceFrame, StationSolution};
use crate::error::ItrfError;

/// Write per-station solutions to a CSV file.
pub fn write_results_csv(path: &Path, solutions: &[StationSolution]) -> Result<(), ItrfError> {
    let mut file = File::create(path).map_err(|e| ItrfError::io(path, &e))?;

    writeln!(
        file,
        "id,domes,epoch,x_m,y_m,z_m,psd_east_mm,psd_north_mm,psd_up_mm,psd_dx_m,psd_dy_m,psd_dz_m,psd_events"
    )
    .map_err(|e| ItrfError::io(path, &e))?;

    for s in solutions {
        writeln!(
            file,
            "{},{},{},{:.5},{:.5},{:.5},{:.4},{:.4},{:.4},{:.6},{:.6},{:.6},{}",
            s.id,
            s.domes,
            s.epoch,
            s.position[0],
            s.position[1],
            s.position[2],
            s.psd_enu_mm[0],
            s.psd_enu_mm[1],
            s.psd_enu_mm[2],
            s.psd_xyz_m[0],
            s.psd_xyz_m[1],
            s.psd_xyz_m[2],
            s.psd_events,
        )
        .map_err(|e| ItrfError::io(path, &e))?;
    }

    Ok(())
}

/// JSON document schema for `--export-json`.
#[derive(Debug, Serialize)]
struct SolutionFile<'a> {
    tool: &'static str,
    frame: &'a ReferenceFrame,
    solutions: &'a [StationSolution],
}

/// Write the full solution set (frame metadata included) as pretty JSON.
pub fn write_results_json(
    path: &Path,
    frame: &ReferenceFrame,
    solutions: &[StationSolution],
) -> Result<(), ItrfError> {
    let file = File::create(path).map_err(|e| ItrfError::io(path, &e))?;
    let doc = SolutionFile {
        tool: "itrf",
        frame,
        solutions,
    };
    serde_json::to_writer_pretty(file, &doc).map_err(|e| ItrfError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Epoch;

    fn sample_solution() -> StationSolution {
        StationSolution {
            id: "GRAS".to_string(),
            domes: "10002M006".to_string(),
            epoch: Epoch::from_query_str("2017:143").unwrap(),
            baseline: [4581690.73, 556115.06, 4389360.93],
            psd_enu_mm: [0.0, 0.0, 0.0],
            psd_xyz_m: [0.0, 0.0, 0.0],
            position: [4581690.73, 556115.06, 4389360.93],
            psd_events: 0,
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_station() {
        let path = std::env::temp_dir().join("itrf_extrap_export_test.csv");
        write_results_csv(&path, &[sample_solution()]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id,domes,epoch,"));
        assert!(lines[1].starts_with("GRAS,10002M006,"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn json_roundtrips_the_solution_fields() {
        let path = std::env::temp_dir().join("itrf_extrap_export_test.json");
        let frame = ReferenceFrame {
            name: "ITRF2014".to_string(),
            reference_epoch: Epoch::from_year(2010).unwrap(),
        };
        write_results_json(&path, &frame, &[sample_solution()]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["frame"]["name"], "ITRF2014");
        assert_eq!(doc["solutions"][0]["id"], "GRAS");
        std::fs::remove_file(&path).ok();
    }
}
