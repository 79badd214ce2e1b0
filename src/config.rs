//! Converter configuration
//!
//! Loaded from `unitbasis.toml` / `.unitbasis.toml`, or any `.toml` or
//! `.json` file given explicitly:
//!
//! ```toml
//! anchors = ["Time", "Length", "Mass", "Electric Charge",
//!            "Temperature", "Luminous Intensity", "Amount of Substance"]
//!
//! [[quantity]]
//! name = "Kinematic Viscosity"
//! unit = "square meter per second"
//! short_unit = "m²/s"
//! exponents = { length = 2, time = -1 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::units::{
    BaseDimension, BasisMatrix, Fraction, Quantity, QuantityCatalog, SI_BASE_NAMES, UnitError,
    catalog,
};

/// File names searched for by [`ConverterConfig::find_config`]
pub const CONFIG_FILE_NAMES: [&str; 2] = ["unitbasis.toml", ".unitbasis.toml"];

/// Anchor selection and custom quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Names of the anchor quantities, in basis order
    #[serde(default = "default_anchors")]
    pub anchors: Vec<String>,

    /// Quantities added to the standard catalog
    #[serde(default, rename = "quantity")]
    pub quantities: Vec<QuantityDef>,
}

fn default_anchors() -> Vec<String> {
    SI_BASE_NAMES.iter().map(|name| name.to_string()).collect()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            anchors: default_anchors(),
            quantities: Vec::new(),
        }
    }
}

/// A user-defined quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityDef {
    pub name: String,
    pub unit: String,
    pub short_unit: String,

    /// Exponents keyed by dimension (`time`, `length`, ...); missing ones are zero
    #[serde(default)]
    pub exponents: BTreeMap<String, Fraction>,
}

impl QuantityDef {
    pub fn to_quantity(&self) -> Result<Quantity, UnitError> {
        let mut builder = Quantity::builder(&self.name, &self.unit, &self.short_unit);
        for (key, &exponent) in &self.exponents {
            builder = builder.with_fraction(key.parse::<BaseDimension>()?, exponent);
        }
        Ok(builder.build())
    }
}

impl ConverterConfig {
    /// Load from file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            _ => {
                return Err(ConfigError::Parse(format!(
                    "unknown config file format: {}",
                    path.display()
                )));
            }
        };

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Find config file in directory hierarchy
    ///
    /// Returns `Ok(None)` when no candidate exists up to the root. A candidate
    /// that exists but cannot be loaded is an error, not a reason to keep
    /// searching.
    pub fn find_config(start: &Path) -> Result<Option<Self>, ConfigError> {
        let mut dir = if start.is_file() {
            match start.parent() {
                Some(parent) => parent.to_path_buf(),
                None => return Ok(None),
            }
        } else {
            start.to_path_buf()
        };

        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Self::from_file(&candidate).map(Some);
                }
            }

            if !dir.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// The standard catalog plus this config's quantities
    pub fn catalog(&self) -> Result<QuantityCatalog, ConfigError> {
        let custom = self
            .quantities
            .iter()
            .map(QuantityDef::to_quantity)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(catalog().extend(custom)?)
    }

    /// Build the basis named by `anchors`, resolved against `catalog`
    pub fn basis(&self, catalog: &QuantityCatalog) -> Result<BasisMatrix, ConfigError> {
        Ok(BasisMatrix::from_names(catalog, &self.anchors)?)
    }
}

/// Configuration error
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    #[diagnostic(code(unitbasis::config::io))]
    Io(String),

    #[error("Parse error: {0}")]
    #[diagnostic(code(unitbasis::config::parse))]
    Parse(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Unit(#[from] UnitError),
}
