//! Modèle de décalage GCJ-02
//!
//! Deux fonctions polynomiales + trigonométriques donnant la perturbation
//! (en unités internes, converties en degrés par `gcj02`) à partir des écarts
//! au point de référence 105°E, 35°N.

use std::f64::consts::PI;

/// Longitude du point de référence
pub const REFERENCE_LNG: f64 = 105.0;

/// Latitude du point de référence
pub const REFERENCE_LAT: f64 = 35.0;

/// Termes sinusoïdaux communs aux deux composantes (ondes 6x et 2x sur dlng)
fn short_wave(dlng: f64) -> f64 {
    (20.0 * (6.0 * dlng * PI).sin() + 20.0 * (2.0 * dlng * PI).sin()) * 2.0 / 3.0
}

/// Perturbation en latitude
pub fn offset_lat(dlng: f64, dlat: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * dlng + 3.0 * dlat + 0.2 * dlat * dlat + 0.1 * dlng * dlat
        + 0.2 * dlng.abs().sqrt();
    ret += short_wave(dlng);
    ret += (20.0 * (dlat * PI).sin() + 40.0 * (dlat / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (dlat / 12.0 * PI).sin() + 320.0 * (dlat * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

/// Perturbation en longitude
pub fn offset_lng(dlng: f64, dlat: f64) -> f64 {
    let mut ret = 300.0 + dlng + 2.0 * dlat + 0.1 * dlng * dlng + 0.1 * dlng * dlat
        + 0.1 * dlng.abs().sqrt();
    ret += short_wave(dlng);
    ret += (20.0 * (dlng * PI).sin() + 40.0 * (dlng / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (dlng / 12.0 * PI).sin() + 300.0 * (dlng / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}
