//! Types d'erreurs pour le crate coordtransform

use thiserror::Error;

/// Erreurs pouvant survenir lors d'une conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Coordonnée hors du domaine de la conversion (bornes lng/lat, borne X
    /// du mercator, ou aucune bande de coefficients trouvée)
    #[error("Invalid coordinate: ({x}, {y})")]
    InvalidCoordinate { x: f64, y: f64 },

    /// Nom de système de coordonnées non reconnu
    #[error("Unknown coordinate system: {0}")]
    UnknownSystem(String),
}

impl CoordError {
    /// Crée une erreur de coordonnée invalide
    pub fn invalid(x: f64, y: f64) -> Self {
        Self::InvalidCoordinate { x, y }
    }

    /// Indique si l'erreur concerne une coordonnée invalide
    pub fn is_invalid_coordinate(&self) -> bool {
        matches!(self, Self::InvalidCoordinate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CoordError::invalid(181.0, 0.0);
        assert_eq!(err.to_string(), "Invalid coordinate: (181, 0)");
        assert!(err.is_invalid_coordinate());

        let err = CoordError::UnknownSystem("utm".into());
        assert_eq!(err.to_string(), "Unknown coordinate system: utm");
        assert!(!err.is_invalid_coordinate());
    }
}
