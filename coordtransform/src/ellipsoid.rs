//! Définitions des ellipsoïdes

/// Ellipsoïde de Krassovsky (utilisé par l'obfuscation GCJ-02)
pub struct Krasovsky;

impl Krasovsky {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub const A: f64 = 6378245.0;

    /// Première excentricité au carré
    pub const EE: f64 = 0.00669342162296594323;

    /// Rayon de courbure du méridien à la latitude `rad_lat` (radians)
    pub fn meridional_radius(rad_lat: f64) -> f64 {
        let magic = Self::magic(rad_lat);
        (Self::A * (1.0 - Self::EE)) / (magic * magic.sqrt())
    }

    /// Grande normale (rayon de courbure dans le plan vertical)
    pub fn normal_radius(rad_lat: f64) -> f64 {
        Self::A / Self::magic(rad_lat).sqrt()
    }

    /// 1 - e² sin²φ
    fn magic(rad_lat: f64) -> f64 {
        let sin_lat = rad_lat.sin();
        1.0 - Self::EE * sin_lat * sin_lat
    }
}
