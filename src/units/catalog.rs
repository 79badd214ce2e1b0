//! Registry of named physical quantities
//!
//! The standard catalog is built once, on first use, and never changes.
//! Looking a quantity up has no side effects. Custom quantities (from a
//! config file) go into a separate catalog made with [`QuantityCatalog::extend`].

use std::collections::HashMap;
use std::sync::OnceLock;

use super::error::{Result, UnitError};
use super::quantity::{BaseDimension, Quantity};

use super::quantity::BaseDimension::{
    AmountOfSubstance as N, Current as I, Length as L, LuminousIntensity as J, Mass as M,
    Temperature as K, Time as T,
};

static STANDARD: OnceLock<QuantityCatalog> = OnceLock::new();

/// The process-wide standard catalog
pub fn catalog() -> &'static QuantityCatalog {
    STANDARD.get_or_init(QuantityCatalog::standard)
}

/// Catalog names of the SI base quantities, in exponent-vector order
pub const SI_BASE_NAMES: [&str; 7] = [
    T.name(),
    L.name(),
    M.name(),
    I.name(),
    K.name(),
    J.name(),
    N.name(),
];

/// Ordered, name-indexed set of quantities
#[derive(Debug, Clone, Default)]
pub struct QuantityCatalog {
    quantities: Vec<Quantity>,
    index: HashMap<String, usize>,
}

impl QuantityCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quantity; names must be unique (ignoring case and separators)
    pub fn insert(&mut self, quantity: Quantity) -> Result<()> {
        let key = normalize(quantity.name());
        if self.index.contains_key(&key) {
            return Err(UnitError::DuplicateQuantity(quantity.name().to_string()));
        }
        self.index.insert(key, self.quantities.len());
        self.quantities.push(quantity);
        Ok(())
    }

    /// Copy of this catalog with `extra` appended
    pub fn extend(&self, extra: impl IntoIterator<Item = Quantity>) -> Result<Self> {
        let mut catalog = self.clone();
        for quantity in extra {
            catalog.insert(quantity)?;
        }
        Ok(catalog)
    }

    /// Find by name: `"Electric Charge"`, `"electric_charge"` and
    /// `"ELECTRIC-CHARGE"` all match
    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.index.get(&normalize(name)).map(|&i| &self.quantities[i])
    }

    /// Like [`QuantityCatalog::get`], failing with `UnknownQuantity`
    pub fn lookup(&self, name: &str) -> Result<&Quantity> {
        self.get(name)
            .ok_or_else(|| UnitError::UnknownQuantity(name.to_string()))
    }

    /// Resolve several names, keeping their order
    pub fn lookup_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Quantity>> {
        names
            .iter()
            .map(|name| self.lookup(name.as_ref()).cloned())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quantity> {
        self.quantities.iter()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// The built-in table of quantities
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for quantity in standard_quantities() {
            // Names in the table are distinct
            let key = normalize(quantity.name());
            catalog.index.entry(key).or_insert(catalog.quantities.len());
            catalog.quantities.push(quantity);
        }
        catalog
    }
}

fn normalize(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn q(name: &str, unit: &str, short_unit: &str, exponents: &[(BaseDimension, i64)]) -> Quantity {
    exponents
        .iter()
        .fold(Quantity::builder(name, unit, short_unit), |b, &(dim, exp)| b.with(dim, exp))
        .build()
}

fn standard_quantities() -> Vec<Quantity> {
    let mut quantities: Vec<Quantity> =
        BaseDimension::ALL.into_iter().map(Quantity::base).collect();

    quantities.extend([
        // =====================================================================
        // Mechanics
        // =====================================================================
        q("Force", "newton", "N", &[(T, -2), (M, 1), (L, 1)]),
        q("Pressure", "pascal", "Pa", &[(T, -2), (M, 1), (L, -1)]),
        q("Stress", "pascal", "Pa", &[(T, -2), (M, 1), (L, -1)]),
        q("Energy", "joule", "J", &[(T, -2), (M, 1), (L, 2)]),
        q("Work", "joule", "J", &[(T, -2), (M, 1), (L, 2)]),
        q("Power", "watt", "W", &[(T, -3), (M, 1), (L, 2)]),
        q("Velocity", "meter per second", "m/s", &[(T, -1), (L, 1)]),
        q("Acceleration", "meter per second squared", "m/s²", &[(T, -2), (L, 1)]),
        q("Jerk", "meter per second cubed", "m/s³", &[(T, -3), (L, 1)]),
        q("Snap", "meter per second quartic", "m/s⁴", &[(T, -4), (L, 1)]),
        q("Crackle", "meter per second quintic", "m/s⁵", &[(T, -5), (L, 1)]),
        q("Pop", "meter per second sextic", "m/s⁶", &[(T, -6), (L, 1)]),
        q("Torque", "newton meter", "Nm", &[(T, -2), (M, 1), (L, 2)]),
        // =====================================================================
        // Electromagnetism
        // =====================================================================
        q("Electric Charge", "coulomb", "C", &[(T, 1), (I, 1)]),
        q("Electric Potential", "volt", "V", &[(T, -3), (I, -1), (M, 1), (L, 2)]),
        q("Electromotive Force", "volt", "V", &[(T, -3), (I, -1), (M, 1), (L, 2)]),
        q("Electric Capacitance", "farad", "F", &[(T, 4), (I, 2), (M, -1), (L, -2)]),
        q("Electric Resistance", "ohm", "Ω", &[(L, 2), (M, 1), (T, -3), (I, -2)]),
        q("Electric Conductance", "siemens", "S", &[(L, -2), (M, -1), (T, 3), (I, 2)]),
        q("Magnetic Flux", "weber", "Wb", &[(L, 2), (M, 1), (T, -2), (I, -1)]),
        q("Magnetic Flux Density", "tesla", "T", &[(M, 1), (T, -2), (I, -1)]),
        q("Magnetic Field", "tesla", "T", &[(M, 1), (T, -2), (I, -1)]),
        q("Inductance", "henry", "H", &[(L, 2), (M, 1), (T, -2), (I, -2)]),
        q("Current Density", "ampere/sq. meter", "A/m²", &[(L, -2), (I, 1)]),
        q("Magnetic Field Strength", "ampere/meter", "A/m", &[(L, -1), (I, 1)]),
        q("Electric Field Strength", "volt/meter", "V/m", &[(T, -3), (I, -1), (M, 1), (L, 1)]),
        q("Potential Gradient", "volt/meter", "V/m", &[(T, -3), (I, -1), (M, 1), (L, 1)]),
        q("Permittivity", "farad/meter", "F/m", &[(M, -1), (L, -3), (T, 4), (I, 2)]),
        q("Permeability", "henry/meter", "H/m", &[(M, 1), (L, 1), (T, -2), (I, -2)]),
        // =====================================================================
        // Thermodynamics
        // =====================================================================
        q("Heat Amount", "joule", "J", &[(T, -2), (M, 1), (L, 2)]),
        q("Celsius Temperature", "celsius", "°C", &[(K, 1)]),
        q("Irradiance", "watt per square meter", "W/m²", &[(T, -3), (M, 1)]),
        q("Heat Capacity", "joule per kelvin", "J/K", &[(T, -2), (M, 1), (L, 2), (K, -1)]),
        q(
            "Specific Heat Capacity",
            "joule per kilogram kelvin",
            "J/kgK",
            &[(T, -2), (L, 2), (K, -1)],
        ),
        q("Specific Energy", "joule per kilogram", "J/kg", &[(T, -2), (L, 2)]),
        q(
            "Thermal Conductivity",
            "watt per meter kelvin",
            "W/mK",
            &[(T, -3), (M, 1), (L, 1), (K, -1)],
        ),
        q("Energy Density", "joule per cu. meter", "J/m³", &[(T, -2), (L, -1), (M, 1)]),
        q("Molar Energy", "joule per mole", "J/mol", &[(T, -2), (M, 1), (L, 2), (N, -1)]),
        q(
            "Molar Heat Capacity",
            "joule per mole kelvin",
            "J/molK",
            &[(T, -2), (M, 1), (L, 2), (K, -1), (N, -1)],
        ),
        // =====================================================================
        // Light and optics
        // =====================================================================
        q("Lens Power", "dioptre", "D", &[(L, -1)]),
        q("Luminous Flux", "lumen", "lm", &[(J, 1)]),
        q("Illuminance", "lux", "lx", &[(L, -2), (J, 1)]),
        // =====================================================================
        // Fluid dynamics
        // =====================================================================
        q("Absement", "meter second", "m s", &[(T, 1), (L, 1)]),
        q("Dynamic Viscosity", "pascal second", "Pa s", &[(M, 1), (T, -1), (L, -1)]),
        q("Surface Tension", "newton/meter", "N/m", &[(M, 1), (T, -2)]),
        // =====================================================================
        // Miscellaneous
        // =====================================================================
        q("Frequency", "hertz", "Hz", &[(T, -1)]),
        q("Radioactivity", "becquerel", "Bq", &[(T, -1)]),
        q("Dose Equivalent", "sievert", "Sv", &[(L, 2), (T, -2)]),
        q("Catalytic Activity", "katal", "kat", &[(T, -1), (N, 1)]),
        q("Area", "square meter", "m²", &[(L, 2)]),
        q("Volume", "cubic meter", "m³", &[(L, 3)]),
        q("Density", "kilogram per cubic meter", "kg/m³", &[(M, 1), (L, -3)]),
    ]);

    quantities
}
