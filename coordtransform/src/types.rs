//! Types de données pour le crate coordtransform

use std::fmt;
use std::str::FromStr;

use crate::CoordError;

/// Systèmes de coordonnées supportés
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordSystem {
    /// WGS-84 (EPSG:4326), degrés
    Wgs84,
    /// GCJ-02, degrés
    Gcj02,
    /// BD-09-LL, degrés
    Bd09,
    /// BD-09-MC (mercator Baidu), mètres
    Bd09Mc,
    /// Web Mercator (EPSG:3857), mètres
    WebMercator,
}

impl CoordSystem {
    /// Tous les systèmes, dans l'ordre d'affichage
    pub const ALL: [CoordSystem; 5] = [
        Self::Wgs84,
        Self::Gcj02,
        Self::Bd09,
        Self::Bd09Mc,
        Self::WebMercator,
    ];

    /// Nom canonique (accepté par `from_str`)
    pub fn name(self) -> &'static str {
        match self {
            Self::Wgs84 => "wgs84",
            Self::Gcj02 => "gcj02",
            Self::Bd09 => "bd09",
            Self::Bd09Mc => "bd09mc",
            Self::WebMercator => "webmercator",
        }
    }

    /// Vrai pour les systèmes projetés (X/Y en mètres)
    pub fn is_projected(self) -> bool {
        matches!(self, Self::Bd09Mc | Self::WebMercator)
    }
}

impl fmt::Display for CoordSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoordSystem {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "wgs84" | "4326" | "gps" => Ok(Self::Wgs84),
            "gcj02" | "gcj" | "amap" => Ok(Self::Gcj02),
            "bd09" | "bd09ll" | "baidu" => Ok(Self::Bd09),
            "bd09mc" | "bdmc" => Ok(Self::Bd09Mc),
            "webmercator" | "webmc" | "3857" => Ok(Self::WebMercator),
            _ => Err(CoordError::UnknownSystem(s.to_string())),
        }
    }
}
