//! Cartesian ↔ geodetic conversion.
//!
//! The Cartesian→geodetic direction follows Fukushima's Halley-accelerated
//! refinement of Borkowski's closed-form construction ("Transformation from
//! Cartesian to geodetic coordinates accelerated by Halley's method",
//! J. Geodesy (2006) 79(12)). The parametrization converges in a single
//! pass, so there is no iteration loop here.
//!
//! Numerical notes:
//! - longitude is closed-form `atan2(y, x)`
//! - points on (or numerically indistinguishable from) the polar axis are
//!   special-cased: `lat = ±90°`, `h = |z| − b` with `b = a(1 − f)`

use serde::{Deserialize, Serialize};

use crate::error::ItrfError;

/// A reference ellipsoid: semi-major axis `a` (m) and flattening `f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

impl Ellipsoid {
    /// GRS80, the ellipsoid ITRF products are referred to.
    pub const GRS80: Ellipsoid = Ellipsoid {
        a: 6_378_137.0,
        f: 0.003_352_810_681_183_637_418,
    };

    /// Validated constructor: `a > 0`, `0 <= f < 1`.
    pub fn new(a: f64, f: f64) -> Result<Ellipsoid, ItrfError> {
        if !a.is_finite() || a <= 0.0 {
            return Err(ItrfError::InvalidEllipsoid {
                message: format!("semi-major axis must be positive, got {a}"),
            });
        }
        if !f.is_finite() || !(0.0..1.0).contains(&f) {
            return Err(ItrfError::InvalidEllipsoid {
                message: format!("flattening must be in [0, 1), got {f}"),
            });
        }
        Ok(Ellipsoid { a, f })
    }

    pub fn semi_major(&self) -> f64 {
        self.a
    }

    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// First eccentricity squared, `e² = (2 − f)·f`.
    pub fn e2(&self) -> f64 {
        (2.0 - self.f) * self.f
    }
}

/// Geodetic coordinates: latitude/longitude in radians, ellipsoidal height
/// in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub lat: f64,
    pub lon: f64,
    pub height: f64,
}

/// Convert Cartesian `(x, y, z)` (m) to geodetic coordinates on `ell`.
pub fn cartesian_to_geodetic(x: f64, y: f64, z: f64, ell: &Ellipsoid) -> Geodetic {
    let a = ell.semi_major();
    // Threshold below which the point counts as on the polar axis.
    let aeps2 = a * a * 1e-32;
    let e2 = ell.e2();
    let e4t = e2 * e2 * 1.5;
    let ep2 = 1.0 - e2;
    let ep = ep2.sqrt();

    let p2 = x * x + y * y;
    let lon = if p2 > 0.0 { y.atan2(x) } else { 0.0 };
    let absz = z.abs();

    let (mut lat, height);
    if p2 > aeps2 {
        // Normalized coefficients of the modified quartic (rescaled by a).
        let p = p2.sqrt();
        let s0 = absz / a;
        let pn = p / a;
        let zp = ep * s0;
        // Newton correction factors.
        let c0 = ep * pn;
        let c02 = c0 * c0;
        let c03 = c02 * c0;
        let s02 = s0 * s0;
        let s03 = s02 * s0;
        let a02 = c02 + s02;
        let a0 = a02.sqrt();
        let a03 = a02 * a0;
        let d0 = zp * a03 + e2 * s03;
        let f0 = pn * a03 - e2 * c03;
        // Halley correction factor.
        let b0 = e4t * s02 * c02 * pn * (a0 - ep);
        let s1 = d0 * f0 - b0 * s0;
        let cp = ep * (f0 * f0 - b0 * c0);

        lat = (s1 / cp).atan();
        let s12 = s1 * s1;
        let cp2 = cp * cp;
        height = (p * cp + absz * s1 - a * (ep2 * s12 + cp2).sqrt()) / (s12 + cp2).sqrt();
    } else {
        // Polar axis: latitude is ±90°, height relative to the semi-minor axis.
        lat = std::f64::consts::FRAC_PI_2;
        height = absz - a * ep;
    }
    if z < 0.0 {
        lat = -lat;
    }

    Geodetic { lat, lon, height }
}

/// Convert geodetic coordinates back to Cartesian (m).
pub fn geodetic_to_cartesian(lat: f64, lon: f64, height: f64, ell: &Ellipsoid) -> [f64; 3] {
    let a = ell.semi_major();
    let e2 = ell.e2();
    let sf = lat.sin();
    let cf = lat.cos();
    // Prime vertical radius of curvature.
    let n = a / (1.0 - e2 * sf * sf).sqrt();
    [
        (n + height) * cf * lon.cos(),
        (n + height) * cf * lon.sin(),
        (n * (1.0 - e2) + height) * sf,
    ]
}
