//! Conversions WGS-84 ↔ GCJ-02
//!
//! Le sens WGS-84 → GCJ-02 est une formule fermée. Il n'existe pas d'inverse
//! analytique : le sens GCJ-02 → WGS-84 évalue le même décalage au point
//! GCJ-02 et le retranche, avec une erreur résiduelle submétrique.

use std::f64::consts::PI;

use crate::ellipsoid::Krasovsky;
use crate::offset::{offset_lat, offset_lng, REFERENCE_LAT, REFERENCE_LNG};
use crate::validation::{ensure_valid, is_in_china};
use crate::CoordError;

/// Décalage (dlng, dlat) en degrés à appliquer au point (lng, lat)
fn delta(lng: f64, lat: f64) -> (f64, f64) {
    let dlat = offset_lat(lng - REFERENCE_LNG, lat - REFERENCE_LAT);
    let dlng = offset_lng(lng - REFERENCE_LNG, lat - REFERENCE_LAT);

    let rad_lat = lat / 180.0 * PI;
    let dlat = (dlat * 180.0) / (Krasovsky::meridional_radius(rad_lat) * PI);
    let dlng = (dlng * 180.0) / (Krasovsky::normal_radius(rad_lat) * rad_lat.cos() * PI);
    (dlng, dlat)
}

/// Convertit WGS-84 vers GCJ-02
///
/// Identité hors de Chine.
pub fn wgs84_to_gcj02(lng: f64, lat: f64) -> Result<(f64, f64), CoordError> {
    ensure_valid(lng, lat)?;

    if !is_in_china(lng, lat) {
        return Ok((lng, lat));
    }

    let (dlng, dlat) = delta(lng, lat);
    Ok((lng + dlng, lat + dlat))
}

/// Convertit GCJ-02 vers WGS-84 (inverse approché)
///
/// Le décalage est calculé comme si le point GCJ-02 était le point WGS-84
/// d'origine. Identité hors de Chine.
pub fn gcj02_to_wgs84(lng: f64, lat: f64) -> Result<(f64, f64), CoordError> {
    ensure_valid(lng, lat)?;

    if !is_in_china(lng, lat) {
        return Ok((lng, lat));
    }

    let (dlng, dlat) = delta(lng, lat);
    let mg_lng = lng + dlng;
    let mg_lat = lat + dlat;
    Ok((lng * 2.0 - mg_lng, lat * 2.0 - mg_lat))
}
