//! Projection Web Mercator (EPSG:3857)
//!
//! Aussi connu sous le nom de Pseudo-Mercator ou Spherical Mercator.
//! Modèle sphérique paramétré par la demi-circonférence terrestre.

use std::f64::consts::PI;

use crate::validation::ensure_valid;
use crate::CoordError;

/// Demi-circonférence terrestre en mètres (π × 6378137)
pub const EARTH_HALF_CIRCUMFERENCE: f64 = 20037508.34;

/// Convertit WGS-84 vers Web Mercator
///
/// Les pôles sont acceptés mais non projetables : lat = -90 donne Y = -∞ et
/// lat = 90 une valeur finie démesurée (tan(π/2) n'est pas infini en f64).
pub fn wgs84_to_web_mercator(lng: f64, lat: f64) -> Result<(f64, f64), CoordError> {
    ensure_valid(lng, lat)?;

    // X = lng × R / 180
    let x = lng * EARTH_HALF_CIRCUMFERENCE / 180.0;

    // Y = ln(tan((90 + lat) × π / 360)) en degrés, ramené en mètres
    let y = ((90.0 + lat) * PI / 360.0).tan().ln() / (PI / 180.0);
    let y = y * EARTH_HALF_CIRCUMFERENCE / 180.0;

    Ok((x, y))
}

/// Convertit Web Mercator vers WGS-84
///
/// Seul X est borné à ±R ; Y n'est pas contrôlé.
pub fn web_mercator_to_wgs84(x: f64, y: f64) -> Result<(f64, f64), CoordError> {
    if !(-EARTH_HALF_CIRCUMFERENCE..=EARTH_HALF_CIRCUMFERENCE).contains(&x) {
        return Err(CoordError::invalid(x, y));
    }

    let lng = x / EARTH_HALF_CIRCUMFERENCE * 180.0;

    // Inverse de Gudermann : lat = 2 × atan(exp(y)) - π/2
    let lat = y / EARTH_HALF_CIRCUMFERENCE * 180.0;
    let lat = 180.0 / PI * (2.0 * (lat * PI / 180.0).exp().atan() - PI / 2.0);

    Ok((lng, lat))
}
