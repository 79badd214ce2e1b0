//! Physical quantities and their dimensional signatures
//!
//! A quantity is described by one exponent per base dimension, in the fixed
//! order of [`BaseDimension::ALL`]:
//!
//! time, length, mass, current, temperature, luminous intensity,
//! amount of substance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::UnitError;
use super::fraction::Fraction;

/// Exponents of a quantity, one per base dimension
pub type ExponentVector = Vec<Fraction>;

/// Number of SI base dimensions
pub const BASE_DIMENSIONS: usize = BaseDimension::ALL.len();

/// The seven SI base dimensions, in exponent-vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseDimension {
    Time,
    Length,
    Mass,
    Current,
    Temperature,
    LuminousIntensity,
    AmountOfSubstance,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; 7] = [
        Self::Time,
        Self::Length,
        Self::Mass,
        Self::Current,
        Self::Temperature,
        Self::LuminousIntensity,
        Self::AmountOfSubstance,
    ];

    /// Position in an exponent vector
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name, also the catalog name of the base quantity
    pub const fn name(self) -> &'static str {
        match self {
            Self::Time => "Time",
            Self::Length => "Length",
            Self::Mass => "Mass",
            Self::Current => "Current",
            Self::Temperature => "Temperature",
            Self::LuminousIntensity => "Luminous Intensity",
            Self::AmountOfSubstance => "Amount of Substance",
        }
    }

    /// snake_case key used in config files
    pub const fn key(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Length => "length",
            Self::Mass => "mass",
            Self::Current => "current",
            Self::Temperature => "temperature",
            Self::LuminousIntensity => "luminous_intensity",
            Self::AmountOfSubstance => "amount_of_substance",
        }
    }

    /// SI base unit name
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Time => "second",
            Self::Length => "meter",
            Self::Mass => "kilogram",
            Self::Current => "ampere",
            Self::Temperature => "kelvin",
            Self::LuminousIntensity => "candela",
            Self::AmountOfSubstance => "mole",
        }
    }

    /// SI base unit symbol
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Time => "s",
            Self::Length => "m",
            Self::Mass => "kg",
            Self::Current => "A",
            Self::Temperature => "K",
            Self::LuminousIntensity => "cd",
            Self::AmountOfSubstance => "mol",
        }
    }
}

impl fmt::Display for BaseDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BaseDimension {
    type Err = UnitError;

    /// Accepts the config key or the display name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|dimension| dimension.key() == key)
            .ok_or_else(|| UnitError::UnknownDimension(s.to_string()))
    }
}

/// A named physical quantity with its display unit and exponent vector
///
/// Quantities are read-only data; the conversion engine only reads the
/// exponent vector and the short unit symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Quantity {
    name: String,
    unit: String,
    short_unit: String,
    exponents: ExponentVector,
}

impl Quantity {
    /// Create a quantity with an explicit exponent vector of any length
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        short_unit: impl Into<String>,
        exponents: ExponentVector,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            short_unit: short_unit.into(),
            exponents,
        }
    }

    /// Start a seven-dimension quantity with all exponents zero
    pub fn builder(
        name: impl Into<String>,
        unit: impl Into<String>,
        short_unit: impl Into<String>,
    ) -> QuantityBuilder {
        QuantityBuilder {
            quantity: Self::new(name, unit, short_unit, vec![Fraction::ZERO; BASE_DIMENSIONS]),
        }
    }

    /// The SI base quantity for one dimension (e.g. Time, in seconds)
    pub fn base(dimension: BaseDimension) -> Self {
        Self::builder(dimension.name(), dimension.unit(), dimension.symbol())
            .with(dimension, 1)
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn short_unit(&self) -> &str {
        &self.short_unit
    }

    pub fn exponents(&self) -> &[Fraction] {
        &self.exponents
    }

    /// Exponent of one base dimension; zero if the vector is shorter
    pub fn exponent(&self, dimension: BaseDimension) -> Fraction {
        self.exponents
            .get(dimension.index())
            .copied()
            .unwrap_or(Fraction::ZERO)
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(Fraction::is_zero)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.short_unit)
    }
}

/// Sets exponents by dimension name instead of position
#[derive(Debug, Clone)]
pub struct QuantityBuilder {
    quantity: Quantity,
}

impl QuantityBuilder {
    /// Set a whole-number exponent
    pub fn with(self, dimension: BaseDimension, exponent: i64) -> Self {
        self.with_fraction(dimension, Fraction::whole(exponent))
    }

    pub fn with_fraction(mut self, dimension: BaseDimension, exponent: Fraction) -> Self {
        self.quantity.exponents[dimension.index()] = exponent;
        self
    }

    pub fn build(self) -> Quantity {
        self.quantity
    }
}
