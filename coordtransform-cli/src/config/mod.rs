//! Configuration de la CLI
//!
//! Ordre de priorité (du plus faible au plus fort) : valeurs par défaut,
//! fichier JSON, variables d'environnement, options de la ligne de commande.

use std::path::Path;

use anyhow::{Context, Result};
use coordtransform::ChainPolicy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::output::OutputFormat;

/// Variable désignant un fichier de configuration JSON
pub const CONFIG_ENV: &str = "COORDTRANSFORM_CONFIG";
/// Nombre de décimales en sortie
pub const PRECISION_ENV: &str = "COORDTRANSFORM_PRECISION";
/// Format de sortie (text, json)
pub const FORMAT_ENV: &str = "COORDTRANSFORM_FORMAT";
/// Politique de chaînage (strict, legacy)
pub const POLICY_ENV: &str = "COORDTRANSFORM_POLICY";

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Nombre de décimales affichées
    pub precision: usize,

    /// Format de sortie
    pub format: OutputFormat,

    /// Traitement des erreurs intermédiaires
    #[serde(
        serialize_with = "serialize_policy",
        deserialize_with = "deserialize_policy"
    )]
    pub policy: ChainPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // 7 décimales ≈ 1 cm en degrés
            precision: 7,
            format: OutputFormat::Text,
            policy: ChainPolicy::Strict,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_json(&content)
    }

    /// Parse une configuration JSON (les champs absents gardent leur défaut)
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse config JSON")
    }

    /// Applique les variables d'environnement fournies par `lookup`
    ///
    /// Les valeurs illisibles sont ignorées.
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(precision) = lookup(PRECISION_ENV).and_then(|p| p.parse().ok()) {
            self.precision = precision;
        }
        if let Some(format) = lookup(FORMAT_ENV).and_then(|f| f.parse().ok()) {
            self.format = format;
        }
        if let Some(policy) = lookup(POLICY_ENV).and_then(|p| p.parse().ok()) {
            self.policy = policy;
        }
        self
    }

    /// Résout la configuration : fichier explicite ou `COORDTRANSFORM_CONFIG`,
    /// puis variables d'environnement du processus
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var(CONFIG_ENV).ok();
        let file = path.map(Path::to_path_buf).or_else(|| from_env.map(Into::into));

        let config = match file {
            Some(file) => Self::load(&file)?,
            None => Self::default(),
        };

        Ok(config.apply_env(|key| std::env::var(key).ok()))
    }
}

fn serialize_policy<S: Serializer>(policy: &ChainPolicy, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(match policy {
        ChainPolicy::Strict => "strict",
        ChainPolicy::Legacy => "legacy",
    })
}

fn deserialize_policy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ChainPolicy, D::Error> {
    let value = String::deserialize(deserializer)?;
    value.parse().map_err(serde::de::Error::custom)
}
