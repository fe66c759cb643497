//! Rendu des résultats de conversion

use coordtransform::{CoordError, CoordSystem};
use serde::{Deserialize, Serialize};

/// Format de sortie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `x,y` par ligne
    #[default]
    Text,
    /// Un objet JSON par ligne
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use: text, json", s)),
        }
    }
}

/// Résultat d'une conversion de point
#[derive(Debug, Clone, Serialize)]
pub struct ConversionRecord {
    pub from: &'static str,
    pub to: &'static str,
    pub input: [f64; 2],
    /// Point converti, absent en cas d'erreur
    pub output: Option<[f64; 2]>,
    /// Message d'erreur, absent en cas de succès
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionRecord {
    pub fn new(
        from: CoordSystem,
        to: CoordSystem,
        input: (f64, f64),
        result: &Result<(f64, f64), CoordError>,
        precision: usize,
    ) -> Self {
        let (output, error) = match result {
            Ok((x, y)) => (Some([round(*x, precision), round(*y, precision)]), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            from: from.name(),
            to: to.name(),
            input: [input.0, input.1],
            output,
            error,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Rend l'enregistrement sur une ligne
    pub fn render(&self, format: OutputFormat, precision: usize) -> String {
        match format {
            OutputFormat::Text => match (&self.output, &self.error) {
                (Some([x, y]), _) => format!("{:.*},{:.*}", precision, x, precision, y),
                (None, Some(e)) => format!("error: {}", e),
                (None, None) => String::new(),
            },
            // La sérialisation d'une structure sans map ne peut pas échouer
            OutputFormat::Json => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

/// Arrondit à `precision` décimales
fn round(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision.min(15) as i32);
    (value * factor).round() / factor
}
