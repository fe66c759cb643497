//! Conversions BD-09-MC ↔ GCJ-02 (mercator Baidu)
//!
//! La projection Baidu n'a pas de forme fermée : elle est approchée par
//! morceaux, une ligne de coefficients par bande de latitude (LL → MC) ou de
//! |Y| (MC → LL). Chaque ligne donne une relation linéaire sur X et un
//! polynôme de degré 6 sur la latitude (ou Y) normalisée.

pub mod tables;

use crate::CoordError;
use tables::{LL2MC, LL_BAND, MC2LL, MC_BAND};

/// Ligne de coefficients
pub type Row = [f64; 10];

/// Longitude ramenée dans [-180, 180] avant projection
const LNG_RANGE: (f64, f64) = (-180.0, 180.0);

/// Latitude bornée à [-74, 74] avant projection
const LAT_RANGE: (f64, f64) = (-74.0, 74.0);

/// Sens de comparaison lors du parcours des seuils
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// Premier seuil tel que `value >= seuil`
    AtLeast,
    /// Premier seuil tel que `-value <= -seuil`
    Mirrored,
}

impl Scan {
    fn matches(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::AtLeast => value >= threshold,
            Self::Mirrored => -value <= -threshold,
        }
    }
}

/// Sélectionne la ligne de coefficients associée à `value`
///
/// `value` est une magnitude (|lat| ou |Y|), `bands` des seuils décroissants
/// alignés ligne à ligne sur `table`. Retourne `None` si aucun seuil ne
/// correspond (NaN).
pub fn select_band<'a>(
    value: f64,
    bands: &[f64; 6],
    table: &'a [Row; 6],
    scan: Scan,
) -> Option<&'a Row> {
    bands
        .iter()
        .position(|&threshold| scan.matches(value, threshold))
        .map(|i| &table[i])
}

/// Recherche directe puis miroir
fn find_row<'a>(value: f64, bands: &[f64; 6], table: &'a [Row; 6]) -> Option<&'a Row> {
    select_band(value, bands, table, Scan::AtLeast)
        .or_else(|| select_band(value, bands, table, Scan::Mirrored))
}

/// Applique une ligne de coefficients, en conservant les signes d'entrée
pub fn evaluate(lng: f64, lat: f64, row: &Row) -> (f64, f64) {
    let mut tlng = row[0] + row[1] * lng.abs();

    let cc = lat.abs() / row[9];
    let mut tlat = 0.0;
    for (i, coef) in row[2..9].iter().enumerate() {
        tlat += coef * cc.powi(i as i32);
    }

    if lng < 0.0 {
        tlng *= -1.0;
    }
    if lat < 0.0 {
        tlat *= -1.0;
    }
    (tlng, tlat)
}

/// Ramène une longitude dans `[min, max]` par tours complets
pub fn wrap_longitude(lng: f64) -> f64 {
    let (min, max) = LNG_RANGE;
    let span = max - min;
    if lng > max {
        lng - ((lng - max) / span).ceil() * span
    } else if lng < min {
        lng + ((min - lng) / span).ceil() * span
    } else {
        lng
    }
}

/// Borne une latitude dans `[min, max]` (écrêtage, sans repliement)
pub fn clamp_latitude(lat: f64) -> f64 {
    let (min, max) = LAT_RANGE;
    lat.clamp(min, max)
}

/// Convertit BD-09-MC (mètres) vers GCJ-02
///
/// La bande est choisie sur |Y| et la même ligne sert aux deux composantes.
pub fn bdmc_to_gcj02(x: f64, y: f64) -> Result<(f64, f64), CoordError> {
    let row = find_row(y.abs(), &MC_BAND, &MC2LL).ok_or_else(|| CoordError::invalid(x, y))?;
    Ok(evaluate(x, y, row))
}

/// Convertit GCJ-02 vers BD-09-MC (mètres)
///
/// La longitude est repliée dans [-180, 180] et la latitude écrêtée à ±74°.
/// Les latitudes sud utilisent la bande de leur valeur absolue.
pub fn gcj02_to_bdmc(lng: f64, lat: f64) -> Result<(f64, f64), CoordError> {
    if !lng.is_finite() || !lat.is_finite() {
        return Err(CoordError::invalid(lng, lat));
    }

    let lng = wrap_longitude(lng);
    let lat = clamp_latitude(lat);

    let row = find_row(lat.abs(), &LL_BAND, &LL2MC).ok_or_else(|| CoordError::invalid(lng, lat))?;
    Ok(evaluate(lng, lat, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_band_at_least() {
        let row = select_band(34.2, &LL_BAND, &LL2MC, Scan::AtLeast).unwrap();
        assert_eq!(row, &LL2MC[3]);

        let row = select_band(0.0, &LL_BAND, &LL2MC, Scan::AtLeast).unwrap();
        assert_eq!(row, &LL2MC[5]);

        let row = select_band(4040249.0, &MC_BAND, &MC2LL, Scan::AtLeast).unwrap();
        assert_eq!(row, &MC2LL[3]);
    }

    #[test]
    fn test_select_band_mirrored_agrees() {
        for value in [0.0, 14.9, 15.0, 44.0, 74.0] {
            assert_eq!(
                select_band(value, &LL_BAND, &LL2MC, Scan::AtLeast),
                select_band(value, &LL_BAND, &LL2MC, Scan::Mirrored)
            );
        }
    }

    #[test]
    fn test_select_band_nan() {
        assert!(select_band(f64::NAN, &MC_BAND, &MC2LL, Scan::AtLeast).is_none());
        assert!(select_band(f64::NAN, &MC_BAND, &MC2LL, Scan::Mirrored).is_none());
        assert!(find_row(f64::NAN, &LL_BAND, &LL2MC).is_none());
    }

    #[test]
    fn test_band_coverage() {
        // Toute latitude de [-74, 74] trouve exactement une bande
        let mut lat = -74.0;
        while lat <= 74.0 {
            assert!(find_row(clamp_latitude(lat).abs(), &LL_BAND, &LL2MC).is_some());
            lat += 0.25;
        }

        let mut y = 0.0;
        while y <= 2.0e7 {
            assert!(find_row(y, &MC_BAND, &MC2LL).is_some());
            y += 12_345.6;
        }
    }

    #[test]
    fn test_evaluate_signs() {
        let row = &LL2MC[3];
        let (x, y) = evaluate(108.0, 34.0, row);
        let (nx, ny) = evaluate(-108.0, -34.0, row);
        assert_eq!((nx, ny), (-x, -y));
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(120.0), 120.0);
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(540.0), 180.0);
        assert_eq!(wrap_longitude(181.0), -179.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(-540.0), -180.0);
        assert_eq!(wrap_longitude(900.0), 180.0);
    }

    #[test]
    fn test_clamp_latitude() {
        assert_eq!(clamp_latitude(80.0), 74.0);
        assert_eq!(clamp_latitude(-89.0), -74.0);
        assert_eq!(clamp_latitude(34.5), 34.5);
    }

    #[test]
    fn test_xian_forward() {
        let (x, y) = gcj02_to_bdmc(108.95344, 34.265657).unwrap();
        assert!((x - 12128773.43).abs() < 1e-2, "x={}", x);
        assert!((y - 4040249.00).abs() < 1e-2, "y={}", y);
    }

    #[test]
    fn test_xian_inverse() {
        let (lng, lat) = bdmc_to_gcj02(12128773.43, 4040249.00).unwrap();
        assert!((lng - 108.95344).abs() < 1e-4, "lng={}", lng);
        assert!((lat - 34.265657).abs() < 1e-4, "lat={}", lat);
    }

    #[test]
    fn test_southern_hemisphere_is_symmetric() {
        let (x, y) = gcj02_to_bdmc(108.95344, 34.265657).unwrap();
        let (sx, sy) = gcj02_to_bdmc(-108.95344, -34.265657).unwrap();
        assert_eq!((sx, sy), (-x, -y));

        let (lng, lat) = bdmc_to_gcj02(-12128773.43, -4040249.00).unwrap();
        assert!((lng + 108.95344).abs() < 1e-4, "lng={}", lng);
        assert!((lat + 34.265657).abs() < 1e-4, "lat={}", lat);
    }

    #[test]
    fn test_latitude_is_clamped() {
        assert_eq!(gcj02_to_bdmc(10.0, 80.0), gcj02_to_bdmc(10.0, 74.0));
    }

    #[test]
    fn test_round_trip() {
        for &(lng, lat) in &[(116.4, 39.9), (121.47, 31.23), (113.26, 23.13), (87.62, 43.82)] {
            let (x, y) = gcj02_to_bdmc(lng, lat).unwrap();
            let (r_lng, r_lat) = bdmc_to_gcj02(x, y).unwrap();
            assert!((r_lng - lng).abs() < 1e-5, "lng={}", r_lng);
            assert!((r_lat - lat).abs() < 1e-5, "lat={}", r_lat);
        }
    }

    #[test]
    fn test_non_finite_input() {
        assert!(gcj02_to_bdmc(f64::INFINITY, 10.0).is_err());
        assert!(gcj02_to_bdmc(10.0, f64::NAN).is_err());
        assert!(bdmc_to_gcj02(1.0e6, f64::NAN)
            .unwrap_err()
            .is_invalid_coordinate());
    }
}
