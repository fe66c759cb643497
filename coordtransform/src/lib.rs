//! # coordtransform
//!
//! Conversions de coordonnées entre les référentiels utilisés par la
//! cartographie chinoise.
//!
//! ## Systèmes
//!
//! - WGS-84 : référentiel GPS mondial
//! - GCJ-02 : référentiel obfusqué imposé en Chine (décalage non inversible)
//! - BD-09-LL : surcouche Baidu de GCJ-02 (déformation polaire)
//! - BD-09-MC : mercator Baidu, approché par bandes polynomiales
//! - Web Mercator (EPSG:3857)
//!
//! Toutes les fonctions sont pures et renvoient un `Result` ; une coordonnée
//! hors domaine donne `CoordError::InvalidCoordinate`.
//!
//! ## Usage
//!
//! ```rust
//! use coordtransform::{wgs84_to_gcj02, CoordSystem, Converter};
//!
//! let (lng, lat) = wgs84_to_gcj02(116.44722222, 39.93083333)?;
//! assert!((lng - 116.4534).abs() < 1e-3);
//!
//! let converter = Converter::new(CoordSystem::Bd09, CoordSystem::Wgs84);
//! let (lng, lat) = converter.transform_point(116.4600064714, 39.9378464687)?;
//! # let _ = (lng, lat);
//! # Ok::<(), coordtransform::CoordError>(())
//! ```

pub mod bd09;
pub mod bdmc;
pub mod convert;
pub mod ellipsoid;
pub mod error;
pub mod gcj02;
pub mod mercator;
pub mod offset;
pub mod types;
pub mod validation;

pub use bd09::{bd09_to_gcj02, gcj02_to_bd09};
pub use bdmc::{bdmc_to_gcj02, gcj02_to_bdmc};
pub use convert::{
    bd09_to_bdmc, bd09_to_wgs84, bdmc_to_bd09, bdmc_to_wgs84, convert, wgs84_to_bd09,
    wgs84_to_bdmc, ChainPolicy, Converter, Step,
};
pub use error::CoordError;
pub use gcj02::{gcj02_to_wgs84, wgs84_to_gcj02};
pub use mercator::{web_mercator_to_wgs84, wgs84_to_web_mercator};
pub use types::CoordSystem;
pub use validation::{is_in_china, is_valid_coordinate};
