//! # coordtransform-cli
//!
//! Interface en ligne de commande pour `coordtransform`.
//!
//! ## Usage CLI
//!
//! ```bash
//! # WGS-84 → BD-09-LL
//! coordtransform convert --from wgs84 --to bd09 116.44722222,39.93083333
//!
//! # BD-09-MC → GCJ-02, sortie JSON
//! coordtransform convert -f bd09mc -t gcj02 --format json 12128773.43,4040249.00
//!
//! # Systèmes disponibles
//! coordtransform systems
//! ```

pub mod cli;
pub mod config;
pub mod output;

pub use cli::{cmd_convert, cmd_systems, parse_point, Commands, ConvertArgs, PointError};
pub use config::Config;
pub use output::{ConversionRecord, OutputFormat};
