//! Conversions GCJ-02 ↔ BD-09-LL
//!
//! Déformation polaire de faible rayon, appliquée partout (pas de test
//! d'emprise Chine).

use std::f64::consts::PI;

use crate::validation::ensure_valid;
use crate::CoordError;

/// Multiplicateur de la déformation polaire
pub const X_PI: f64 = PI * 3000.0 / 180.0;

/// Translation finale appliquée par BD-09 (lng, lat)
const BD09_SHIFT: (f64, f64) = (0.0065, 0.006);

/// Convertit GCJ-02 vers BD-09-LL
///
/// Le décalage peut sortir du domaine : à lng = 180 ou lat = 90 le résultat
/// dépasse la borne et `bd09_to_gcj02` le refuse.
pub fn gcj02_to_bd09(lng: f64, lat: f64) -> Result<(f64, f64), CoordError> {
    ensure_valid(lng, lat)?;

    let z = (lng * lng + lat * lat).sqrt() + 0.00002 * (lat * X_PI).sin();
    let theta = lat.atan2(lng) + 0.000003 * (lng * X_PI).cos();
    Ok((
        z * theta.cos() + BD09_SHIFT.0,
        z * theta.sin() + BD09_SHIFT.1,
    ))
}

/// Convertit BD-09-LL vers GCJ-02
pub fn bd09_to_gcj02(lng: f64, lat: f64) -> Result<(f64, f64), CoordError> {
    ensure_valid(lng, lat)?;

    let x = lng - BD09_SHIFT.0;
    let y = lat - BD09_SHIFT.1;
    let z = (x * x + y * y).sqrt() - 0.00002 * (y * X_PI).sin();
    let theta = y.atan2(x) - 0.000003 * (x * X_PI).cos();
    Ok((z * theta.cos(), z * theta.sin()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beijing_forward() {
        let (lng, lat) = gcj02_to_bd09(116.45341276, 39.93219903).unwrap();
        assert!((lng - 116.46000647).abs() < 1e-4, "lng={}", lng);
        assert!((lat - 39.93784647).abs() < 1e-4, "lat={}", lat);
    }

    #[test]
    fn test_beijing_inverse() {
        let (lng, lat) = bd09_to_gcj02(116.4600064714, 39.9378464687).unwrap();
        assert!((lng - 116.4534127584).abs() < 1e-4, "lng={}", lng);
        assert!((lat - 39.9321990290).abs() < 1e-4, "lat={}", lat);
    }

    #[test]
    fn test_applies_outside_china() {
        let (lng, lat) = gcj02_to_bd09(2.35, 48.85).unwrap();
        assert!(lng != 2.35 && lat != 48.85);
    }

    #[test]
    fn test_round_trip() {
        for &(lng, lat) in &[(116.4, 39.9), (121.47, 31.23), (87.62, 43.82), (-70.0, -33.0)] {
            let (b_lng, b_lat) = gcj02_to_bd09(lng, lat).unwrap();
            let (g_lng, g_lat) = bd09_to_gcj02(b_lng, b_lat).unwrap();
            assert!((g_lng - lng).abs() < 1e-5, "lng={}", g_lng);
            assert!((g_lat - lat).abs() < 1e-5, "lat={}", g_lat);
        }
    }

    #[test]
    fn test_border_leaves_domain() {
        let (lng, lat) = gcj02_to_bd09(180.0, 90.0).unwrap();
        assert!(lng > 180.0 && lat > 90.0, "({}, {})", lng, lat);
        assert!(bd09_to_gcj02(lng, lat).unwrap_err().is_invalid_coordinate());

        let (lng, _) = gcj02_to_bd09(180.0, 0.0).unwrap();
        assert!(bd09_to_gcj02(lng, 0.0).is_err());
    }

    #[test]
    fn test_invalid_input() {
        assert!(gcj02_to_bd09(0.0, 91.0).is_err());
        assert!(bd09_to_gcj02(f64::NAN, 0.0).is_err());
    }
}
