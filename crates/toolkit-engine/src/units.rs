//! Unit registry and conversion engine.
//!
//! Every category has an implicit base unit (meter, gram, degree Celsius).
//! A conversion normalizes the source value into the base unit and then
//! projects it out into the destination unit. Units are affine, not just
//! multiplicative, so temperature scales with a shifted zero point go
//! through the same two steps as lengths and weights.
//!
//! # Functions
//!
//! - [`units`] — the ordered unit table of a category
//! - [`find_unit`] — look a unit up by key or symbol
//! - [`convert`] — convert a number between two units of one category
//! - [`convert_input`] — lenient form-field conversion with 2-decimal display
//! - [`ConverterState`] — the converter form: category, selectors, input

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ToolkitError};

/// Decimal places used for converted values on display.
pub const DISPLAY_DECIMALS: usize = 2;

// ── Categories ──────────────────────────────────────────────────────────────

/// A family of mutually convertible units sharing one base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    #[default]
    Length,
    Weight,
    Temperature,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 3] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Temperature,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UnitCategory::Length => "length",
            UnitCategory::Weight => "weight",
            UnitCategory::Temperature => "temperature",
        }
    }

    /// The category's units in display order. The first entry is the base unit.
    pub fn units(self) -> &'static [UnitDefinition] {
        units(self)
    }

    /// The unit selected by default when switching to this category.
    pub fn first_unit(self) -> &'static UnitDefinition {
        &units(self)[0]
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitCategory {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" | "distance" => Ok(UnitCategory::Length),
            "weight" | "mass" => Ok(UnitCategory::Weight),
            "temperature" | "temp" => Ok(UnitCategory::Temperature),
            _ => Err(ToolkitError::UnknownCategory(s.to_string())),
        }
    }
}

// ── Unit definitions ────────────────────────────────────────────────────────

/// A unit with an exactly invertible affine mapping onto its category's base unit.
///
/// `to_base(x) = (x - zero) * numerator / denominator`
///
/// Keeping the factor as a ratio lets the inverse multiply by
/// `denominator / numerator` instead of dividing by a rounded fraction, so
/// `0 °C` comes back as exactly `32 °F`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitDefinition {
    /// Registry key (e.g., `"kilometer"`).
    pub key: &'static str,
    /// Display name (e.g., `"Kilometer"`).
    pub name: &'static str,
    /// Short symbol (e.g., `"km"`).
    pub symbol: &'static str,
    #[serde(skip)]
    zero: f64,
    #[serde(skip)]
    numerator: f64,
    #[serde(skip)]
    denominator: f64,
}

impl UnitDefinition {
    const fn linear(key: &'static str, name: &'static str, symbol: &'static str, factor: f64) -> Self {
        Self {
            key,
            name,
            symbol,
            zero: 0.0,
            numerator: factor,
            denominator: 1.0,
        }
    }

    const fn ratio(
        key: &'static str,
        name: &'static str,
        symbol: &'static str,
        numerator: f64,
        denominator: f64,
    ) -> Self {
        Self {
            key,
            name,
            symbol,
            zero: 0.0,
            numerator,
            denominator,
        }
    }

    const fn affine(
        key: &'static str,
        name: &'static str,
        symbol: &'static str,
        zero: f64,
        numerator: f64,
        denominator: f64,
    ) -> Self {
        Self {
            key,
            name,
            symbol,
            zero,
            numerator,
            denominator,
        }
    }

    /// Express `value` (in this unit) in the category's base unit.
    pub fn to_base(&self, value: f64) -> f64 {
        (value - self.zero) * self.numerator / self.denominator
    }

    /// Express a base-unit `value` in this unit.
    pub fn from_base(&self, value: f64) -> f64 {
        value * self.denominator / self.numerator + self.zero
    }

    /// Whether the key, symbol or name identifies this unit (case-insensitive).
    fn matches(&self, query: &str) -> bool {
        self.key.eq_ignore_ascii_case(query)
            || self.symbol.eq_ignore_ascii_case(query)
            || self.name.eq_ignore_ascii_case(query)
    }
}

static LENGTH_UNITS: [UnitDefinition; 7] = [
    UnitDefinition::linear("meter", "Meter", "m", 1.0),
    UnitDefinition::linear("kilometer", "Kilometer", "km", 1000.0),
    UnitDefinition::ratio("centimeter", "Centimeter", "cm", 1.0, 100.0),
    UnitDefinition::ratio("millimeter", "Millimeter", "mm", 1.0, 1000.0),
    UnitDefinition::linear("mile", "Mile", "mi", 1609.344),
    UnitDefinition::linear("foot", "Foot", "ft", 0.3048),
    UnitDefinition::linear("inch", "Inch", "in", 0.0254),
];

static WEIGHT_UNITS: [UnitDefinition; 5] = [
    UnitDefinition::linear("gram", "Gram", "g", 1.0),
    UnitDefinition::linear("kilogram", "Kilogram", "kg", 1000.0),
    UnitDefinition::ratio("milligram", "Milligram", "mg", 1.0, 1000.0),
    UnitDefinition::linear("pound", "Pound", "lb", 453.59237),
    UnitDefinition::linear("ounce", "Ounce", "oz", 28.349523125),
];

static TEMPERATURE_UNITS: [UnitDefinition; 3] = [
    UnitDefinition::linear("celsius", "Celsius", "C", 1.0),
    UnitDefinition::affine("fahrenheit", "Fahrenheit", "F", 32.0, 5.0, 9.0),
    UnitDefinition::affine("kelvin", "Kelvin", "K", 273.15, 1.0, 1.0),
];

/// The ordered unit table of `category`. The first entry is the base unit.
pub fn units(category: UnitCategory) -> &'static [UnitDefinition] {
    match category {
        UnitCategory::Length => &LENGTH_UNITS,
        UnitCategory::Weight => &WEIGHT_UNITS,
        UnitCategory::Temperature => &TEMPERATURE_UNITS,
    }
}

/// Find a unit of `category` by key, symbol or display name.
pub fn find_unit(category: UnitCategory, query: &str) -> Option<&'static UnitDefinition> {
    let query = query.trim();
    units(category).iter().find(|unit| unit.matches(query))
}

fn require_unit(category: UnitCategory, query: &str) -> Result<&'static UnitDefinition> {
    find_unit(category, query).ok_or_else(|| ToolkitError::UnknownUnit {
        category: category.to_string(),
        unit: query.to_string(),
    })
}

// ── Conversion ──────────────────────────────────────────────────────────────

/// Convert `value` from unit `from` to unit `to` within `category`.
///
/// # Errors
///
/// Returns [`ToolkitError::UnknownUnit`] if either unit does not belong to
/// the category.
///
/// # Examples
///
/// ```
/// use toolkit_engine::units::{convert, UnitCategory};
///
/// let km = convert(UnitCategory::Length, "meter", "kilometer", 1000.0).unwrap();
/// assert_eq!(km, 1.0);
///
/// let f = convert(UnitCategory::Temperature, "celsius", "fahrenheit", 0.0).unwrap();
/// assert_eq!(f, 32.0);
/// ```
pub fn convert(category: UnitCategory, from: &str, to: &str, value: f64) -> Result<f64> {
    let from_unit = require_unit(category, from)?;
    let to_unit = require_unit(category, to)?;
    Ok(convert_between(from_unit, to_unit, value))
}

/// Convert between two already-resolved units.
pub fn convert_between(from: &UnitDefinition, to: &UnitDefinition, value: f64) -> f64 {
    let base = from.to_base(value);
    let result = to.from_base(base);
    debug!(from = from.key, to = to.key, value, base, result, "converted");
    result
}

/// Convert a raw form-field string and format it for display.
///
/// Empty, non-numeric or non-finite input yields `Ok(None)`; the converter
/// simply shows nothing rather than reporting an error.
pub fn convert_input(
    category: UnitCategory,
    from: &str,
    to: &str,
    raw: &str,
) -> Result<Option<String>> {
    let from_unit = require_unit(category, from)?;
    let to_unit = require_unit(category, to)?;
    Ok(parse_number(raw)
        .map(|value| format_fixed(convert_between(from_unit, to_unit, value), DISPLAY_DECIMALS)))
}

/// Parse a locale-insensitive base-10 number. `None` for blank, malformed or non-finite input.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format with a fixed number of decimal places (`1` → `"1.00"`).
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

// ── Converter form state ────────────────────────────────────────────────────

/// The converter form: selected category, both unit selectors and the raw input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConverterState {
    category: UnitCategory,
    from_unit: &'static str,
    to_unit: &'static str,
    input: String,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self::new(UnitCategory::default())
    }
}

impl ConverterState {
    /// A blank form on `category` with both selectors on its first unit.
    pub fn new(category: UnitCategory) -> Self {
        let first = category.first_unit().key;
        Self {
            category,
            from_unit: first,
            to_unit: first,
            input: String::new(),
        }
    }

    pub fn category(&self) -> UnitCategory {
        self.category
    }

    pub fn from_unit(&self) -> &'static str {
        self.from_unit
    }

    pub fn to_unit(&self) -> &'static str {
        self.to_unit
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Switch category. Both selectors reset to the new category's first unit
    /// so they can never point at a unit from another category.
    pub fn set_category(&mut self, category: UnitCategory) {
        let first = category.first_unit().key;
        self.category = category;
        self.from_unit = first;
        self.to_unit = first;
    }

    pub fn set_from_unit(&mut self, unit: &str) -> Result<()> {
        self.from_unit = require_unit(self.category, unit)?.key;
        Ok(())
    }

    pub fn set_to_unit(&mut self, unit: &str) -> Result<()> {
        self.to_unit = require_unit(self.category, unit)?.key;
        Ok(())
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// The value shown in the read-only output field, if any.
    pub fn output(&self) -> Option<String> {
        // Selectors only ever hold keys of the current category.
        convert_input(self.category, self.from_unit, self.to_unit, &self.input)
            .ok()
            .flatten()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_meter_to_kilometer() {
        let out = convert_input(UnitCategory::Length, "meter", "kilometer", "1000").unwrap();
        assert_eq!(out.as_deref(), Some("1.00"));
    }

    #[test]
    fn test_celsius_to_fahrenheit_freezing() {
        let out = convert_input(UnitCategory::Temperature, "celsius", "fahrenheit", "0").unwrap();
        assert_eq!(out.as_deref(), Some("32.00"));
    }

    #[test]
    fn test_fahrenheit_to_celsius_boiling() {
        let c = convert(UnitCategory::Temperature, "fahrenheit", "celsius", 212.0).unwrap();
        assert!(approx(c, 100.0), "got {c}");
    }

    #[test]
    fn test_negative_temperature_is_affine() {
        // -40 is the crossover point of the two scales
        let f = convert(UnitCategory::Temperature, "celsius", "fahrenheit", -40.0).unwrap();
        assert!(approx(f, -40.0), "got {f}");
    }

    #[test]
    fn test_kelvin_absolute_zero() {
        let c = convert(UnitCategory::Temperature, "kelvin", "celsius", 0.0).unwrap();
        assert!(approx(c, -273.15));
        let f = convert(UnitCategory::Temperature, "kelvin", "fahrenheit", 0.0).unwrap();
        assert!(approx(f, -459.67), "got {f}");
    }

    #[test]
    fn test_kilogram_to_gram() {
        let g = convert(UnitCategory::Weight, "kilogram", "gram", 2.5).unwrap();
        assert!(approx(g, 2500.0));
    }

    #[test]
    fn test_pound_to_kilogram() {
        let kg = convert(UnitCategory::Weight, "lb", "kg", 1.0).unwrap();
        assert!(approx(kg, 0.45359237));
    }

    #[test]
    fn test_same_unit_is_identity() {
        let v = convert(UnitCategory::Length, "mile", "mile", 3.7).unwrap();
        assert!(approx(v, 3.7));
    }

    #[test]
    fn test_lookup_by_symbol_and_name() {
        assert_eq!(find_unit(UnitCategory::Length, "KM").unwrap().key, "kilometer");
        assert_eq!(find_unit(UnitCategory::Weight, "Ounce").unwrap().key, "ounce");
        assert!(find_unit(UnitCategory::Length, "gram").is_none());
    }

    #[test]
    fn test_unit_from_other_category_is_error() {
        let err = convert(UnitCategory::Length, "meter", "gram", 1.0).unwrap_err();
        assert!(matches!(err, ToolkitError::UnknownUnit { .. }));
        assert!(err.to_string().contains("gram"), "got: {err}");
    }

    #[test]
    fn test_empty_input_has_no_result() {
        let out = convert_input(UnitCategory::Length, "meter", "kilometer", "").unwrap();
        assert_eq!(out, None);
        let out = convert_input(UnitCategory::Length, "meter", "kilometer", "   ").unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn test_non_numeric_input_has_no_result() {
        for raw in ["abc", "12abc", "NaN", "inf", "1,5"] {
            let out = convert_input(UnitCategory::Weight, "gram", "kilogram", raw).unwrap();
            assert_eq!(out, None, "input {raw:?}");
        }
    }

    #[test]
    fn test_base_unit_is_first() {
        assert_eq!(UnitCategory::Length.first_unit().key, "meter");
        assert_eq!(UnitCategory::Weight.first_unit().key, "gram");
        assert_eq!(UnitCategory::Temperature.first_unit().key, "celsius");
        for category in UnitCategory::ALL {
            let base = category.first_unit();
            assert_eq!(base.to_base(12.5), 12.5);
            assert_eq!(base.from_base(12.5), 12.5);
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Length".parse::<UnitCategory>().unwrap(), UnitCategory::Length);
        assert_eq!("mass".parse::<UnitCategory>().unwrap(), UnitCategory::Weight);
        assert!("volume".parse::<UnitCategory>().is_err());
    }

    #[test]
    fn test_state_category_switch_resets_selectors() {
        let mut state = ConverterState::new(UnitCategory::Length);
        state.set_from_unit("kilometer").unwrap();
        state.set_to_unit("mile").unwrap();
        state.set_category(UnitCategory::Temperature);
        assert_eq!(state.from_unit(), "celsius");
        assert_eq!(state.to_unit(), "celsius");
    }

    #[test]
    fn test_state_rejects_foreign_unit() {
        let mut state = ConverterState::new(UnitCategory::Weight);
        assert!(state.set_from_unit("meter").is_err());
        assert_eq!(state.from_unit(), "gram");
    }

    #[test]
    fn test_state_output_tracks_input() {
        let mut state = ConverterState::default();
        assert_eq!(state.output(), None);
        state.set_to_unit("km").unwrap();
        state.set_input("2500");
        assert_eq!(state.output().as_deref(), Some("2.50"));
        state.set_input("");
        assert_eq!(state.output(), None);
    }

    #[test]
    fn test_format_fixed_rounds() {
        assert_eq!(format_fixed(1.005_f64 + 1e-9, 2), "1.01");
        assert_eq!(format_fixed(2.0, 2), "2.00");
        assert_eq!(format_fixed(-17.777_777, 2), "-17.78");
    }
}
