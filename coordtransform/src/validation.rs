//! Validation des coordonnées

use crate::CoordError;

/// Emprise approximative de la Chine où l'obfuscation GCJ-02 s'applique
/// (longitude min, longitude max, latitude min, latitude max)
const CHINA_BBOX: (f64, f64, f64, f64) = (73.66, 135.05, 3.86, 53.55);

/// Vérifie que la longitude est dans [-180, 180] et la latitude dans [-90, 90]
///
/// NaN n'est jamais valide.
pub fn is_valid_coordinate(lng: f64, lat: f64) -> bool {
    (-180.0..=180.0).contains(&lng) && (-90.0..=90.0).contains(&lat)
}

/// Vérifie si le point tombe dans l'emprise de la Chine (bornes exclues)
pub fn is_in_china(lng: f64, lat: f64) -> bool {
    let (min_lng, max_lng, min_lat, max_lat) = CHINA_BBOX;
    lng > min_lng && lng < max_lng && lat > min_lat && lat < max_lat
}

/// Retourne `InvalidCoordinate` si le couple lng/lat est hors bornes
pub fn ensure_valid(lng: f64, lat: f64) -> Result<(), CoordError> {
    if is_valid_coordinate(lng, lat) {
        Ok(())
    } else {
        Err(CoordError::invalid(lng, lat))
    }
}
