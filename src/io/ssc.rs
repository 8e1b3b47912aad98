//! SSC catalog reader: station positions, velocities and validity intervals.
//!
//! An SSC file opens with a one-line header
//!
//! ```text
//! ITRF2014 STATION POSITIONS AT EPOCH 2010.0 AND VELOCITIES ...
//! ```
//!
//! followed by 6 descriptive lines, then two-line station records:
//!
//! ```text
//! 10002M006 Grasse (OCA)     GNSS GRAS  4581690.8267   556114.9242  4389360.8453 0.0006 0.0006 0.0006  1 00:000:00000 96:277:00000
//! 10002M006                             -0.0137   0.0189   0.0115 0.0001 0.0001 0.0001
//! ```
//!
//! The first line carries fixed-column identity fields (DOMES [0..9],
//! name [10..27], technique [27..31], 4-char id [32..36]), then whitespace
//! separated X/Y/Z/σX/σY/σZ, an optional integer solution number, and an
//! optional validity interval as two compact epochs. The second line repeats
//! the DOMES code and carries VX/VY/VZ/σVX/σVY/σVZ. Both `00:000:00000`
//! sentinels (or an absent interval) mean the record is open-ended.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::{BaselinePosition, ReferenceFrame, StationRecord, StationSelector};
use crate::error::ItrfError;
use crate::io::CatalogLines;
use crate::time::{fractional_years, Epoch};

/// Descriptive lines between the header and the first record.
const HEADER_SKIP_LINES: usize = 6;

/// Column where the whitespace-separated numeric fields begin on both
/// record lines.
const NUMERIC_START: usize = 36;

/// Sentinel compact epoch marking an open interval bound.
const OPEN_INTERVAL: &str = "00:000:00000";

/// Read and validate the SSC header, leaving the stream positioned at the
/// first station record.
///
/// The header line must split into exactly 8 tokens: the frame name, the
/// verbatim keywords `STATION POSITIONS AT EPOCH`, a numeric (integral)
/// epoch year, and the verbatim keywords `AND VELOCITIES`.
pub fn read_reference_frame<R: BufRead>(
    lines: &mut CatalogLines<R>,
) -> Result<ReferenceFrame, ItrfError> {
    let header = lines
        .next_line()?
        .ok_or_else(|| lines.format_err("empty file: missing SSC header"))?;

    let tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.len() != 8 {
        return Err(lines.format_err(format!(
            "expected 8 header tokens, got {}: '{}'",
            tokens.len(),
            header.trim()
        )));
    }
    let keywords = [
        (1, "STATION"),
        (2, "POSITIONS"),
        (3, "AT"),
        (4, "EPOCH"),
        (6, "AND"),
        (7, "VELOCITIES"),
    ];
    for (idx, want) in keywords {
        if tokens[idx] != want {
            return Err(lines.format_err(format!(
                "bad header keyword: expected '{want}', got '{}'",
                tokens[idx]
            )));
        }
    }

    let epoch_year: f64 = tokens[5]
        .parse()
        .map_err(|_| lines.format_err(format!("bad reference epoch '{}'", tokens[5])))?;
    if epoch_year.fract() != 0.0 {
        return Err(lines.format_err(format!(
            "reference epoch '{}' is not an integral year",
            tokens[5]
        )));
    }
    let reference_epoch = Epoch::from_year(epoch_year as i32)
        .ok_or_else(|| lines.format_err(format!("reference epoch '{}' out of range", tokens[5])))?;

    for _ in 0..HEADER_SKIP_LINES {
        lines
            .next_line()?
            .ok_or_else(|| lines.format_err("truncated SSC header block"))?;
    }

    Ok(ReferenceFrame {
        name: tokens[0].to_string(),
        reference_epoch,
    })
}

/// Parse one two-line station record. The position line is passed in; the
/// velocity line is read from the stream.
pub fn read_station_record<R: BufRead>(
    first_line: &str,
    lines: &mut CatalogLines<R>,
) -> Result<StationRecord, ItrfError> {
    if !first_line.is_ascii() {
        return Err(lines.format_err("station record line contains non-ASCII bytes"));
    }
    if first_line.len() < NUMERIC_START {
        return Err(lines.format_err(format!(
            "station record line too short ({} chars)",
            first_line.len()
        )));
    }
    let domes = first_line[0..9].trim().to_string();
    let name = first_line[10..27].trim().to_string();
    let tqn = first_line[27..31].trim().to_string();
    let id = first_line[32..36].trim().to_string();

    // The numeric tail is six floats, then an optional integer solution
    // number, then an optional two-epoch validity interval.
    let tail: Vec<&str> = first_line[NUMERIC_START..].split_whitespace().collect();
    let interval: &[&str] = match tail.len() {
        6 => &[],
        8 => &tail[6..8],
        9 => {
            if tail[6].parse::<u32>().is_err() {
                return Err(lines.format_err(format!(
                    "expected integer solution number before validity interval, got '{}'",
                    tail[6]
                )));
            }
            &tail[7..9]
        }
        n => {
            return Err(lines.format_err(format!(
                "expected 6 position fields (+ optional solution number and validity interval), got {n} fields"
            )));
        }
    };
    let mut pos = [0.0f64; 6];
    for (i, tok) in tail[..6].iter().enumerate() {
        pos[i] = tok
            .parse()
            .map_err(|_| lines.format_err(format!("bad position field '{tok}'")))?;
    }

    let mut valid_from = Epoch::MIN;
    let mut valid_until = Epoch::MAX;
    if let [from, until] = *interval {
        if from != OPEN_INTERVAL {
            valid_from = Epoch::from_compact(from, lines.file(), lines.line_no())?;
        }
        if until != OPEN_INTERVAL {
            valid_until = Epoch::from_compact(until, lines.file(), lines.line_no())?;
        }
        if valid_from > valid_until {
            return Err(lines.format_err(format!(
                "validity interval starts after it ends ({from} > {until})"
            )));
        }
    }

    let velocity_line = lines
        .next_line()?
        .ok_or_else(|| lines.format_err("unexpected end of file: missing velocity line"))?;
    let vtokens: Vec<&str> = velocity_line.split_whitespace().collect();
    if vtokens.len() != 7 {
        return Err(lines.format_err(format!(
            "expected 7 velocity-line fields, got {}",
            vtokens.len()
        )));
    }
    if vtokens[0] != domes {
        return Err(lines.format_err(format!(
            "velocity line DOMES '{}' does not match position line DOMES '{domes}'",
            vtokens[0]
        )));
    }
    let mut vel = [0.0f64; 6];
    for (i, tok) in vtokens[1..].iter().enumerate() {
        vel[i] = tok
            .parse()
            .map_err(|_| lines.format_err(format!("bad velocity field '{tok}'")))?;
    }

    Ok(StationRecord {
        domes,
        name,
        tqn,
        id,
        valid_from,
        valid_until,
        x: pos[0],
        y: pos[1],
        z: pos[2],
        sx: pos[3],
        sy: pos[4],
        sz: pos[5],
        vx: vel[0],
        vy: vel[1],
        vz: vel[2],
        svx: vel[3],
        svy: vel[4],
        svz: vel[5],
    })
}

/// Linear coordinate model: `x0 + v·dtq` with `dtq` in fractional years.
pub fn linear_extrapolate(x0: f64, velocity: f64, dtq: f64) -> f64 {
    x0 + velocity * dtq
}

/// Scan all records once and extrapolate every requested station whose
/// validity interval contains `t`.
///
/// `t0` is the reference epoch the catalog coordinates are defined at
/// (from the header). Each selector is satisfied at most once — the first
/// record whose interval contains `t` wins — and selectors with no matching
/// record are simply not represented in the result.
pub fn extrapolate_ssc<R: BufRead>(
    lines: &mut CatalogLines<R>,
    selectors: &[StationSelector],
    t: Epoch,
    t0: Epoch,
) -> Result<Vec<BaselinePosition>, ItrfError> {
    let dtq = fractional_years(t0, t);
    let mut pending: Vec<&StationSelector> = selectors.iter().collect();
    let mut results = Vec::with_capacity(selectors.len());

    while let Some(line) = lines.next_line()? {
        if line.trim().is_empty() {
            continue;
        }
        let record = read_station_record(&line, lines)?;
        if pending.is_empty() {
            continue;
        }
        if let Some(idx) = pending
            .iter()
            .position(|s| s.matches(&record.id, &record.domes))
        {
            if record.contains(t) {
                pending.swap_remove(idx);
                results.push(BaselinePosition {
                    id: record.id.clone(),
                    domes: record.domes.clone(),
                    x: linear_extrapolate(record.x, record.vx, dtq),
                    y: linear_extrapolate(record.y, record.vy, dtq),
                    z: linear_extrapolate(record.z, record.vz, dtq),
                });
            }
        }
    }
    Ok(results)
}

/// Open an SSC file, read its header and run the extrapolation query with
/// the reference epoch threaded from the header.
pub fn extrapolate_ssc_file(
    path: &Path,
    selectors: &[StationSelector],
    t: Epoch,
) -> Result<(ReferenceFrame, Vec<BaselinePosition>), ItrfError> {
    let file = File::open(path).map_err(|e| ItrfError::io(path, &e))?;
    let mut lines = CatalogLines::new(BufReader::new(file), path.display().to_string());
    let frame = read_reference_frame(&mut lines)?;
    let positions = extrapolate_ssc(&mut lines, selectors, t, frame.reference_epoch)?;
    Ok((frame, positions))
}
