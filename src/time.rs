//! Epoch handling for ITRF catalogs.
//!
//! Both catalog formats stamp dates as compact `YY:DDD:SSSSS` strings
//! (2-digit year, day of year, integer seconds of day). This module decodes
//! those into calendar instants and computes the signed fractional-year
//! differences the extrapolation formulas run on.
//!
//! Century rule: the two-digit year resolves with a fixed pivot, independent
//! of wall-clock time — `yy >= 70` means 19yy, otherwise 20yy. A fixed pivot
//! keeps parsing deterministic no matter when the tool runs.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ItrfError;

/// Two-digit years at or above this value resolve to the 1900s.
const CENTURY_PIVOT: u32 = 70;

/// Seconds per day.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days per Julian year, the denominator used throughout ITRF processing.
const DAYS_PER_YEAR: f64 = 365.25;

/// A calendar instant with second resolution.
///
/// Thin wrapper over `chrono::NaiveDateTime`; the catalogs carry no timezone
/// information, so naive civil time is the right representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Epoch(pub NaiveDateTime);

impl Epoch {
    /// Earliest representable instant; used for open-ended validity starts.
    pub const MIN: Epoch = Epoch(NaiveDateTime::MIN);
    /// Latest representable instant; used for open-ended validity stops.
    pub const MAX: Epoch = Epoch(NaiveDateTime::MAX);

    /// Midnight, January 1st of the given year.
    pub fn from_year(year: i32) -> Option<Epoch> {
        let date = NaiveDate::from_ymd_opt(year, 1, 1)?;
        Some(Epoch(date.and_hms_opt(0, 0, 0)?))
    }

    /// Decode a compact `YY:DDD:SSSSS` catalog epoch.
    ///
    /// The day of year may be 1-3 digits, the seconds-of-day field any
    /// non-negative integer. `file`/`line` feed the error context.
    pub fn from_compact(s: &str, file: &str, line: usize) -> Result<Epoch, ItrfError> {
        let bad = |msg: String| ItrfError::catalog(file, line, msg);

        let mut parts = s.trim().split(':');
        let (yy, doy, sec) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(d), Some(s), None) => (y, d, s),
            _ => {
                return Err(bad(format!(
                    "expected compact epoch 'YY:DDD:SSSSS', got '{s}'"
                )))
            }
        };

        let yy: u32 = yy
            .parse()
            .map_err(|_| bad(format!("invalid year field in epoch '{s}'")))?;
        let doy: u32 = doy
            .parse()
            .map_err(|_| bad(format!("invalid day-of-year field in epoch '{s}'")))?;
        let sec: u32 = sec
            .parse()
            .map_err(|_| bad(format!("invalid seconds field in epoch '{s}'")))?;

        if yy > 99 {
            return Err(bad(format!("two-digit year out of range in epoch '{s}'")));
        }
        let year = if yy >= CENTURY_PIVOT {
            1900 + yy as i32
        } else {
            2000 + yy as i32
        };

        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| bad(format!("invalid year in epoch '{s}'")))?;
        if doy == 0 || doy > 366 {
            return Err(bad(format!("day of year out of range in epoch '{s}'")));
        }

        let instant = jan1
            .and_hms_opt(0, 0, 0)
            .map(|t| t + Duration::days(doy as i64 - 1) + Duration::seconds(sec as i64))
            .ok_or_else(|| bad(format!("invalid epoch '{s}'")))?;

        Ok(Epoch(instant))
    }

    /// Parse a query epoch from the command line: `YYYY:DDD` or
    /// `YYYY:DDD:SSSSS` (full 4-digit year).
    pub fn from_query_str(s: &str) -> Result<Epoch, ItrfError> {
        let bad =
            |msg: String| ItrfError::usage(format!("Invalid query epoch '{s}': {msg}"));

        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(bad("expected 'YYYY:DDD' or 'YYYY:DDD:SSSSS'".to_string()));
        }
        let year: i32 = parts[0]
            .parse()
            .map_err(|_| bad("bad year".to_string()))?;
        let doy: u32 = parts[1]
            .parse()
            .map_err(|_| bad("bad day of year".to_string()))?;
        let sec: u32 = if parts.len() == 3 {
            parts[2].parse().map_err(|_| bad("bad seconds".to_string()))?
        } else {
            0
        };

        if doy == 0 || doy > 366 {
            return Err(bad("day of year out of range".to_string()));
        }
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| bad("bad year".to_string()))?;
        let instant = jan1
            .and_hms_opt(0, 0, 0)
            .map(|t| t + Duration::days(doy as i64 - 1) + Duration::seconds(sec as i64))
            .ok_or_else(|| bad("bad epoch".to_string()))?;

        Ok(Epoch(instant))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Signed difference `to - from` in fractional Julian years:
/// `(days + seconds/86400) / 365.25`.
///
/// This is the elapsed-time measure both the velocity extrapolation and the
/// PSD models are defined on.
pub fn fractional_years(from: Epoch, to: Epoch) -> f64 {
    let delta = to.0 - from.0;
    delta.num_seconds() as f64 / SECONDS_PER_DAY / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn compact_epoch_basic() {
        // '09:280:80331' = 2009, day 280, 80331 s of day.
        let e = Epoch::from_compact("09:280:80331", "t", 1).unwrap();
        assert_eq!(e.year(), 2009);
        assert_eq!(e.0.ordinal(), 280);
        assert_eq!(e.0.num_seconds_from_midnight(), 80331);
    }

    #[test]
    fn century_pivot_is_fixed() {
        let old = Epoch::from_compact("96:277:00000", "t", 1).unwrap();
        assert_eq!(old.year(), 1996);
        let new = Epoch::from_compact("10:058:23656", "t", 1).unwrap();
        assert_eq!(new.year(), 2010);
        // Pivot boundary: 70 is 1970, 69 is 2069.
        assert_eq!(Epoch::from_compact("70:001:00000", "t", 1).unwrap().year(), 1970);
        assert_eq!(Epoch::from_compact("69:001:00000", "t", 1).unwrap().year(), 2069);
    }

    #[test]
    fn compact_epoch_rejects_garbage() {
        assert!(Epoch::from_compact("2009:280:0", "t", 1).is_err());
        assert!(Epoch::from_compact("09:400:0", "t", 1).is_err());
        assert!(Epoch::from_compact("09:280", "t", 1).is_err());
        assert!(Epoch::from_compact("ab:cd:ef", "t", 1).is_err());
    }

    #[test]
    fn fractional_years_sign_and_scale() {
        let t0 = Epoch::from_year(2005).unwrap();
        let t1 = Epoch::from_query_str("2007:001:43200").unwrap();
        // 730 days + 12 h = 730.5 days = exactly 2.0 Julian years.
        let dyr = fractional_years(t0, t1);
        assert!((dyr - 2.0).abs() < 1e-12);
        assert!((fractional_years(t1, t0) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn fractional_years_zero() {
        let t = Epoch::from_year(2014).unwrap();
        assert_eq!(fractional_years(t, t), 0.0);
    }

    #[test]
    fn query_epoch_without_seconds() {
        let e = Epoch::from_query_str("2017:143").unwrap();
        assert_eq!(e.year(), 2017);
        assert_eq!(e.0.ordinal(), 143);
    }
}
