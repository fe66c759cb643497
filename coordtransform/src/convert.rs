//! Composition des conversions
//!
//! Les systèmes forment un arbre centré sur GCJ-02 :
//!
//! ```text
//! WebMercator ── WGS-84 ── GCJ-02 ── BD-09-LL
//!                            │
//!                         BD-09-MC
//! ```
//!
//! Toute conversion suit le chemin unique de cet arbre entre la source et la
//! cible, une étape élémentaire par arête.

use tracing::{debug, warn};

use crate::bd09::{bd09_to_gcj02, gcj02_to_bd09};
use crate::bdmc::{bdmc_to_gcj02, gcj02_to_bdmc};
use crate::gcj02::{gcj02_to_wgs84, wgs84_to_gcj02};
use crate::mercator::{web_mercator_to_wgs84, wgs84_to_web_mercator};
use crate::{CoordError, CoordSystem};

/// Conversion élémentaire entre deux systèmes voisins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Wgs84ToGcj02,
    Gcj02ToWgs84,
    Gcj02ToBd09,
    Bd09ToGcj02,
    Gcj02ToBdmc,
    BdmcToGcj02,
    Wgs84ToWebMercator,
    WebMercatorToWgs84,
}

impl Step {
    /// Étape reliant deux systèmes adjacents
    fn between(from: CoordSystem, to: CoordSystem) -> Option<Self> {
        use CoordSystem::*;
        match (from, to) {
            (Wgs84, Gcj02) => Some(Self::Wgs84ToGcj02),
            (Gcj02, Wgs84) => Some(Self::Gcj02ToWgs84),
            (Gcj02, Bd09) => Some(Self::Gcj02ToBd09),
            (Bd09, Gcj02) => Some(Self::Bd09ToGcj02),
            (Gcj02, Bd09Mc) => Some(Self::Gcj02ToBdmc),
            (Bd09Mc, Gcj02) => Some(Self::BdmcToGcj02),
            (Wgs84, WebMercator) => Some(Self::Wgs84ToWebMercator),
            (WebMercator, Wgs84) => Some(Self::WebMercatorToWgs84),
            _ => None,
        }
    }

    /// Applique l'étape à un point
    pub fn apply(self, x: f64, y: f64) -> Result<(f64, f64), CoordError> {
        match self {
            Self::Wgs84ToGcj02 => wgs84_to_gcj02(x, y),
            Self::Gcj02ToWgs84 => gcj02_to_wgs84(x, y),
            Self::Gcj02ToBd09 => gcj02_to_bd09(x, y),
            Self::Bd09ToGcj02 => bd09_to_gcj02(x, y),
            Self::Gcj02ToBdmc => gcj02_to_bdmc(x, y),
            Self::BdmcToGcj02 => bdmc_to_gcj02(x, y),
            Self::Wgs84ToWebMercator => wgs84_to_web_mercator(x, y),
            Self::WebMercatorToWgs84 => web_mercator_to_wgs84(x, y),
        }
    }
}

/// Parent d'un système dans l'arbre de conversion (GCJ-02 est la racine)
fn parent(system: CoordSystem) -> Option<CoordSystem> {
    match system {
        CoordSystem::Gcj02 => None,
        CoordSystem::Wgs84 | CoordSystem::Bd09 | CoordSystem::Bd09Mc => Some(CoordSystem::Gcj02),
        CoordSystem::WebMercator => Some(CoordSystem::Wgs84),
    }
}

/// Chemin d'un système jusqu'à la racine (inclus)
fn ancestors(system: CoordSystem) -> Vec<CoordSystem> {
    let mut chain = vec![system];
    let mut current = system;
    while let Some(next) = parent(current) {
        chain.push(next);
        current = next;
    }
    chain
}

/// Calcule la suite d'étapes de `from` vers `to`
fn plan(from: CoordSystem, to: CoordSystem) -> Vec<Step> {
    let up = ancestors(from);
    let down = ancestors(to);

    // Premier ancêtre commun (la racine l'est toujours)
    let common = up
        .iter()
        .position(|s| down.contains(s))
        .unwrap_or(up.len() - 1);
    let pivot = up[common];
    let descent = down.iter().position(|&s| s == pivot).unwrap_or(down.len() - 1);

    let mut path: Vec<CoordSystem> = up[..=common].to_vec();
    path.extend(down[..descent].iter().rev());

    path.windows(2)
        .filter_map(|w| Step::between(w[0], w[1]))
        .collect()
}

/// Traitement des erreurs intermédiaires d'une chaîne de conversions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChainPolicy {
    /// Toute erreur d'étape interrompt la chaîne (défaut)
    #[default]
    Strict,
    /// Comportement historique : l'échec d'une étape BD-09-MC → GCJ-02 suivie
    /// d'autres étapes est ignoré et (0, 0) est transmis à l'étape suivante
    Legacy,
}

impl std::str::FromStr for ChainPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "legacy" => Ok(Self::Legacy),
            _ => Err(format!("Invalid chain policy: {}. Use: strict, legacy", s)),
        }
    }
}

/// Convertisseur entre deux systèmes quelconques
#[derive(Debug, Clone)]
pub struct Converter {
    from: CoordSystem,
    to: CoordSystem,
    steps: Vec<Step>,
    policy: ChainPolicy,
}

impl Converter {
    /// Crée un convertisseur (identité si `from == to`)
    pub fn new(from: CoordSystem, to: CoordSystem) -> Self {
        let steps = plan(from, to);
        debug!(from = %from, to = %to, steps = ?steps, "Planned conversion route");

        Self {
            from,
            to,
            steps,
            policy: ChainPolicy::default(),
        }
    }

    /// Change la politique de chaînage
    pub fn with_policy(mut self, policy: ChainPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Système des points en entrée
    pub fn source(&self) -> CoordSystem {
        self.from
    }

    /// Système des points en sortie
    pub fn target(&self) -> CoordSystem {
        self.to
    }

    /// Politique de chaînage en vigueur
    pub fn policy(&self) -> ChainPolicy {
        self.policy
    }

    /// Étapes élémentaires dans l'ordre d'application
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Transforme un point de la source vers la cible
    pub fn transform_point(&self, x: f64, y: f64) -> Result<(f64, f64), CoordError> {
        let mut point = (x, y);
        let last = self.steps.len().saturating_sub(1);

        for (i, step) in self.steps.iter().enumerate() {
            point = match step.apply(point.0, point.1) {
                Ok(p) => p,
                Err(e) if self.swallows(*step, i < last) => {
                    warn!(step = ?step, error = %e, "Ignoring intermediate conversion failure");
                    (0.0, 0.0)
                }
                Err(e) => return Err(e),
            };
        }
        Ok(point)
    }

    fn swallows(&self, step: Step, has_next: bool) -> bool {
        self.policy == ChainPolicy::Legacy && step == Step::BdmcToGcj02 && has_next
    }

    /// Retourne le chemin suivi (ex: "bd09 → gcj02 → wgs84")
    pub fn description(&self) -> String {
        let mut names = vec![self.from.name()];
        let mut current = self.from;
        for step in &self.steps {
            current = step_target(*step);
            names.push(current.name());
        }
        debug_assert_eq!(current, self.to);
        names.join(" → ")
    }
}

fn step_target(step: Step) -> CoordSystem {
    match step {
        Step::Gcj02ToWgs84 | Step::WebMercatorToWgs84 => CoordSystem::Wgs84,
        Step::Wgs84ToGcj02 | Step::Bd09ToGcj02 | Step::BdmcToGcj02 => CoordSystem::Gcj02,
        Step::Gcj02ToBd09 => CoordSystem::Bd09,
        Step::Gcj02ToBdmc => CoordSystem::Bd09Mc,
        Step::Wgs84ToWebMercator => CoordSystem::WebMercator,
    }
}

/// Convertit un point entre deux systèmes quelconques (erreurs propagées)
pub fn convert(
    from: CoordSystem,
    to: CoordSystem,
    x: f64,
    y: f64,
) -> Result<(f64, f64), CoordError> {
    Converter::new(from, to).transform_point(x, y)
}

/// Convertit BD-09-LL vers WGS-84
pub fn bd09_to_wgs84(lng: f64, lat: f64) -> Result<(f64, f64), CoordError> {
    let (g_lng, g_lat) = bd09_to_gcj02(lng, lat)?;
    gcj02_to_wgs84(g_lng, g_lat)
}

/// Convertit WGS-84 vers BD-09-LL
pub fn wgs84_to_bd09(lng: f64, lat: f64) -> Result<(f64, f64), CoordError> {
    let (g_lng, g_lat) = wgs84_to_gcj02(lng, lat)?;
    gcj02_to_bd09(g_lng, g_lat)
}

/// Convertit BD-09-MC vers WGS-84
pub fn bdmc_to_wgs84(x: f64, y: f64) -> Result<(f64, f64), CoordError> {
    let (g_lng, g_lat) = bdmc_to_gcj02(x, y)?;
    gcj02_to_wgs84(g_lng, g_lat)
}

/// Convertit BD-09-MC vers BD-09-LL
pub fn bdmc_to_bd09(x: f64, y: f64) -> Result<(f64, f64), CoordError> {
    let (g_lng, g_lat) = bdmc_to_gcj02(x, y)?;
    gcj02_to_bd09(g_lng, g_lat)
}

/// Convertit WGS-84 vers BD-09-MC
pub fn wgs84_to_bdmc(lng: f64, lat: f64) -> Result<(f64, f64), CoordError> {
    let (g_lng, g_lat) = wgs84_to_gcj02(lng, lat)?;
    gcj02_to_bdmc(g_lng, g_lat)
}

/// Convertit BD-09-LL vers BD-09-MC
pub fn bd09_to_bdmc(lng: f64, lat: f64) -> Result<(f64, f64), CoordError> {
    let (g_lng, g_lat) = bd09_to_gcj02(lng, lat)?;
    gcj02_to_bdmc(g_lng, g_lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use CoordSystem::*;

    #[test]
    fn test_plan_identity() {
        for system in CoordSystem::ALL {
            assert!(plan(system, system).is_empty());
        }
    }

    #[test]
    fn test_plan_routes() {
        assert_eq!(plan(Wgs84, Gcj02), vec![Step::Wgs84ToGcj02]);
        assert_eq!(plan(Bd09, Wgs84), vec![Step::Bd09ToGcj02, Step::Gcj02ToWgs84]);
        assert_eq!(plan(Bd09Mc, Bd09), vec![Step::BdmcToGcj02, Step::Gcj02ToBd09]);
        assert_eq!(
            plan(WebMercator, Bd09Mc),
            vec![Step::WebMercatorToWgs84, Step::Wgs84ToGcj02, Step::Gcj02ToBdmc]
        );
        assert_eq!(plan(Wgs84, WebMercator), vec![Step::Wgs84ToWebMercator]);
        assert_eq!(plan(WebMercator, Wgs84), vec![Step::WebMercatorToWgs84]);
    }

    #[test]
    fn test_every_pair_is_routed() {
        for from in CoordSystem::ALL {
            for to in CoordSystem::ALL {
                let converter = Converter::new(from, to);
                let mut current = from;
                for step in converter.steps() {
                    current = step_target(*step);
                }
                assert_eq!(current, to, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_accessors() {
        let converter = Converter::new(Bd09Mc, WebMercator);
        assert_eq!(converter.source(), Bd09Mc);
        assert_eq!(converter.target(), WebMercator);
        assert_eq!(converter.policy(), ChainPolicy::Strict);
        assert_eq!(converter.steps().len(), 3);
    }

    #[test]
    fn test_description() {
        assert_eq!(
            Converter::new(Bd09, Wgs84).description(),
            "bd09 → gcj02 → wgs84"
        );
        assert_eq!(Converter::new(Gcj02, Gcj02).description(), "gcj02");
    }

    #[test]
    fn test_converter_matches_free_functions() {
        let (lng, lat) = (116.44722222, 39.93083333);
        assert_eq!(
            Converter::new(Wgs84, Bd09).transform_point(lng, lat),
            wgs84_to_bd09(lng, lat)
        );
        assert_eq!(
            Converter::new(Wgs84, Bd09Mc).transform_point(lng, lat),
            wgs84_to_bdmc(lng, lat)
        );
        assert_eq!(convert(Gcj02, Gcj02, lng, lat), Ok((lng, lat)));
    }

    #[test]
    fn test_strict_policy_propagates_inner_failure() {
        let err = bdmc_to_wgs84(1.0e6, f64::NAN).unwrap_err();
        assert!(err.is_invalid_coordinate());

        let strict = Converter::new(Bd09Mc, Wgs84);
        assert!(strict.transform_point(1.0e6, f64::NAN).is_err());
    }

    #[test]
    fn test_legacy_policy_swallows_bdmc_failure() {
        let legacy = Converter::new(Bd09Mc, Wgs84).with_policy(ChainPolicy::Legacy);
        assert_eq!(legacy.policy(), ChainPolicy::Legacy);
        // (0, 0) est hors de Chine : GCJ-02 → WGS-84 le laisse inchangé
        assert_eq!(legacy.transform_point(1.0e6, f64::NAN), Ok((0.0, 0.0)));

        // Une étape finale échoue toujours, même en mode legacy
        let direct = Converter::new(Bd09Mc, Gcj02).with_policy(ChainPolicy::Legacy);
        assert!(direct.transform_point(1.0e6, f64::NAN).is_err());
    }

    #[test]
    fn test_legacy_policy_keeps_other_errors() {
        let legacy = Converter::new(Bd09, Wgs84).with_policy(ChainPolicy::Legacy);
        assert!(legacy.transform_point(200.0, 0.0).is_err());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Strict".parse::<ChainPolicy>(), Ok(ChainPolicy::Strict));
        assert_eq!("legacy".parse::<ChainPolicy>(), Ok(ChainPolicy::Legacy));
        assert!("loose".parse::<ChainPolicy>().is_err());
    }
}
