//! PSD catalog reader: per-station post-seismic deformation models.
//!
//! Each seismic event occupies three lines (East, North, Up):
//!
//! ```text
//!  ANTC  A 41713S001 10:058:23656 E 3 -192.03  0.5969  -72.74  0.0799     GPS
//!                                 N 3   61.57  2.1357   26.26  0.2294
//!                                 U 4  157.62  3.3132   25.61  0.1854
//! ```
//!
//! Shared fixed columns: 4-char id [1..5], component letter at column 32,
//! model tag digit at column 34, model parameters in columns 36..72.
//! The East line additionally carries the DOMES number [9..18] and the
//! earthquake epoch [19..31]. Anything past column 72 (the technique) is
//! ignored. Reading the components out of E/N/U order is a format error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::{EarthquakeEvent, EnuCorrection, StationSelector};
use crate::error::ItrfError;
use crate::io::CatalogLines;
use crate::models::ParametricModel;
use crate::time::{fractional_years, Epoch};

/// Column of the component letter ('E'/'N'/'U').
const COMPONENT_COL: usize = 32;
/// Column of the model tag digit.
const MODEL_COL: usize = 34;
/// Parameter field, up to 4 whitespace-separated floats.
const PARAMS_SPAN: std::ops::Range<usize> = 36..72;

/// Parse one component line: verify the expected component letter, then
/// build the model from the tag digit and its parameter list.
fn read_component_model<R: BufRead>(
    line: &str,
    expect: char,
    lines: &CatalogLines<R>,
) -> Result<ParametricModel, ItrfError> {
    let bytes = line.as_bytes();
    if !line.is_ascii() {
        return Err(lines.format_err("PSD component line contains non-ASCII bytes"));
    }
    if bytes.len() <= MODEL_COL {
        return Err(lines.format_err(format!(
            "PSD component line too short ({} chars)",
            bytes.len()
        )));
    }
    let cmp = bytes[COMPONENT_COL] as char;
    if cmp != expect {
        return Err(lines.format_err(format!(
            "expected component '{expect}' at column {COMPONENT_COL}, found '{cmp}'"
        )));
    }
    let tag_char = bytes[MODEL_COL] as char;
    let tag: i64 = tag_char
        .to_digit(10)
        .map(i64::from)
        .ok_or_else(|| lines.format_err(format!("bad model tag character '{tag_char}'")))?;

    let end = PARAMS_SPAN.end.min(line.len());
    let params: Vec<f64> = if PARAMS_SPAN.start < end {
        line[PARAMS_SPAN.start..end]
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|_| lines.format_err(format!("bad model parameter '{tok}'")))
            })
            .collect::<Result<_, _>>()?
    } else {
        Vec::new()
    };

    ParametricModel::from_catalog(tag, &params)
}

/// Read one three-line event record. The East line is passed in; North and
/// Up are read from the stream.
pub fn read_event<R: BufRead>(
    first_line: &str,
    lines: &mut CatalogLines<R>,
) -> Result<EarthquakeEvent, ItrfError> {
    if !first_line.is_ascii() || first_line.len() < 31 {
        return Err(lines.format_err(format!(
            "PSD east line too short or malformed ({} chars)",
            first_line.len()
        )));
    }
    let id = first_line[1..5].trim().to_string();
    let domes = first_line[9..18].trim().to_string();
    let epoch = Epoch::from_compact(&first_line[19..31], lines.file(), lines.line_no())?;
    let east = read_component_model(first_line, 'E', lines)?;

    let north_line = lines
        .next_line()?
        .ok_or_else(|| lines.format_err("unexpected end of file: missing North line"))?;
    let north = read_component_model(&north_line, 'N', lines)?;

    let up_line = lines
        .next_line()?
        .ok_or_else(|| lines.format_err("unexpected end of file: missing Up line"))?;
    let up = read_component_model(&up_line, 'U', lines)?;

    Ok(EarthquakeEvent {
        id,
        domes,
        epoch,
        east,
        north,
        up,
    })
}

/// Scan the catalog once and sum the corrections of every event matching the
/// selector, evaluated at the query epoch `t`. Millimeters per component.
///
/// All matching events are summed unconditionally, including events dated
/// after `t` (the published catalog semantics). When nothing matches, the
/// zero correction is returned with the requested identifier filled in —
/// most stations have no associated seismic event, so this is not an error.
pub fn accumulate_psd<R: BufRead>(
    lines: &mut CatalogLines<R>,
    t: Epoch,
    selector: &StationSelector,
) -> Result<EnuCorrection, ItrfError> {
    let mut total = match selector {
        StationSelector::Id(id) => EnuCorrection::zero(id.clone(), ""),
        StationSelector::Domes(domes) => EnuCorrection::zero("", domes.clone()),
    };

    while let Some(line) = lines.next_line()? {
        if line.trim().is_empty() {
            continue;
        }
        let event = read_event(&line, lines)?;
        if !selector.matches(&event.id, &event.domes) {
            continue;
        }
        let dtq = fractional_years(event.epoch, t);
        total.east_mm += event.east.evaluate(dtq)?;
        total.north_mm += event.north.evaluate(dtq)?;
        total.up_mm += event.up.evaluate(dtq)?;
        total.events += 1;
        total.id = event.id;
        total.domes = event.domes;
    }
    Ok(total)
}

/// Open a PSD file and run the accumulation query.
pub fn accumulate_psd_file(
    path: &Path,
    t: Epoch,
    selector: &StationSelector,
) -> Result<EnuCorrection, ItrfError> {
    let file = File::open(path).map_err(|e| ItrfError::io(path, &e))?;
    let mut lines = CatalogLines::new(BufReader::new(file), path.display().to_string());
    accumulate_psd(&mut lines, t, selector)
}
