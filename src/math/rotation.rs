//! Local topocentric (ENU) ↔ Cartesian vector rotation.
//!
//! The East/North/Up frame is anchored at a Cartesian point; the rotation is
//! built from the sine/cosine of the geodetic latitude and longitude at that
//! point. This converts *displacement* vectors only — there is no
//! translation term.

use nalgebra::{Matrix3, Vector3};

use crate::math::geodetic::{cartesian_to_geodetic, Ellipsoid};

/// Rotate a local `[e, n, u]` displacement (any consistent unit) into a
/// Cartesian `[dx, dy, dz]` displacement, with the local frame anchored at
/// `(at_x, at_y, at_z)` on `ell`.
pub fn enu_to_cartesian(
    e: f64,
    n: f64,
    u: f64,
    at_x: f64,
    at_y: f64,
    at_z: f64,
    ell: &Ellipsoid,
) -> [f64; 3] {
    let g = cartesian_to_geodetic(at_x, at_y, at_z, ell);
    let (sl, cl) = g.lon.sin_cos();
    let (sf, cf) = g.lat.sin_cos();

    // Standard ENU→ECEF rotation.
    let rot = Matrix3::new(
        -sl, -cl * sf, cl * cf, //
        cl, -sl * sf, sl * cf, //
        0.0, cf, sf,
    );
    let d = rot * Vector3::new(e, n, u);
    [d.x, d.y, d.z]
}
