//! Définition et implémentation des commandes CLI
//!
//! - `convert`: conversion de un ou plusieurs points
//! - `systems`: liste des systèmes supportés

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use coordtransform::{ChainPolicy, CoordSystem, Converter};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::output::{ConversionRecord, OutputFormat};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert points between two coordinate systems
    Convert(ConvertArgs),

    /// List supported coordinate systems
    Systems,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Source system (wgs84, gcj02, bd09, bd09mc, webmercator)
    #[arg(short, long, value_parser = parse_system)]
    pub from: CoordSystem,

    /// Target system (wgs84, gcj02, bd09, bd09mc, webmercator)
    #[arg(short, long, value_parser = parse_system)]
    pub to: CoordSystem,

    /// Points as "x,y" (lng,lat in degrees or X,Y in metres)
    #[arg(required = true, allow_hyphen_values = true)]
    pub points: Vec<String>,

    /// Decimal places in the output (défaut : 7 ou COORDTRANSFORM_PRECISION)
    #[arg(short, long)]
    pub precision: Option<usize>,

    /// Output format (défaut : text ou COORDTRANSFORM_FORMAT)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Ignore BD-09-MC intermediate failures like the historical implementation
    #[arg(long)]
    pub legacy: bool,

    /// Path to a JSON config file (défaut : env COORDTRANSFORM_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConvertArgs {
    /// Applique les options de la ligne de commande sur la configuration
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.legacy {
            config.policy = ChainPolicy::Legacy;
        }
        config
    }
}

fn parse_system(s: &str) -> Result<CoordSystem, String> {
    s.parse().map_err(|e: coordtransform::CoordError| e.to_string())
}

/// Erreur de lecture d'un point
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PointError {
    /// Le point ne contient pas exactement deux valeurs
    #[error("Expected two comma-separated values, got: {0}")]
    Arity(String),

    /// Une des valeurs n'est pas un nombre
    #[error("Invalid number '{value}' in point '{point}'")]
    Number { point: String, value: String },
}

/// Lit un point "x,y" (espaces tolérés autour des valeurs)
pub fn parse_point(s: &str) -> Result<(f64, f64), PointError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y] = parts.as_slice() else {
        return Err(PointError::Arity(s.to_string()));
    };

    let number = |value: &str| {
        fast_float::parse::<f64, _>(value).map_err(|_| PointError::Number {
            point: s.to_string(),
            value: value.to_string(),
        })
    };

    Ok((number(*x)?, number(*y)?))
}

/// Exécute la commande convert
///
/// Tous les points sont lus avant la première écriture : un point mal formé
/// interrompt la commande sans sortie. Chaque point est ensuite converti
/// indépendamment ; les échecs sont rendus en sortie puis signalés globalement.
pub fn cmd_convert<W: Write>(args: &ConvertArgs, config: &Config, out: &mut W) -> Result<()> {
    let inputs = args
        .points
        .iter()
        .map(|raw| parse_point(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let converter = Converter::new(args.from, args.to).with_policy(config.policy);

    info!(
        route = %converter.description(),
        points = args.points.len(),
        policy = ?config.policy,
        "Starting conversion"
    );

    let mut failures = 0usize;
    for (raw, &input) in args.points.iter().zip(&inputs) {
        let result = converter.transform_point(input.0, input.1);
        if let Err(e) = &result {
            warn!(point = %raw, error = %e, "Conversion failed");
            failures += 1;
        }

        let record = ConversionRecord::new(converter.source(), converter.target(), input, &result, config.precision);
        debug!(?record, "Converted point");
        writeln!(out, "{}", record.render(config.format, config.precision))
            .context("Failed to write output")?;
    }

    if failures > 0 {
        anyhow::bail!("{} of {} point(s) failed to convert", failures, args.points.len());
    }
    Ok(())
}

/// Exécute la commande systems
pub fn cmd_systems<W: Write>(out: &mut W) -> Result<()> {
    for system in CoordSystem::ALL {
        let unit = if system.is_projected() { "m" } else { "deg" };
        writeln!(out, "{:<12} {:<4} {}", system.name(), unit, describe(system))
            .context("Failed to write output")?;
    }
    Ok(())
}

fn describe(system: CoordSystem) -> &'static str {
    match system {
        CoordSystem::Wgs84 => "WGS-84 (GPS)",
        CoordSystem::Gcj02 => "GCJ-02 (China national datum)",
        CoordSystem::Bd09 => "BD-09 longitude/latitude (Baidu)",
        CoordSystem::Bd09Mc => "BD-09 mercator (Baidu)",
        CoordSystem::WebMercator => "Web Mercator (EPSG:3857)",
    }
}
