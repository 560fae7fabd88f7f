//! The catalogue of available tools and their routes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, ToolkitError};

/// Grouping used for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    Text,
    Code,
    Image,
    Calculators,
}

impl ToolCategory {
    pub fn label(self) -> &'static str {
        match self {
            ToolCategory::Text => "Text Tools",
            ToolCategory::Code => "Code Tools",
            ToolCategory::Image => "Image Tools",
            ToolCategory::Calculators => "Calculators",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    AgeCalculator,
    UnitConverter,
    EmiCalculator,
    WordCounter,
    TypingSpeedTester,
    JsonFormatter,
    Base64Encoder,
    MetaGenerator,
    PasswordGenerator,
    ColorPicker,
    QrCodeGenerator,
}

impl Tool {
    const ALL: [Tool; 11] = [
        Tool::AgeCalculator,
        Tool::UnitConverter,
        Tool::EmiCalculator,
        Tool::WordCounter,
        Tool::TypingSpeedTester,
        Tool::JsonFormatter,
        Tool::Base64Encoder,
        Tool::MetaGenerator,
        Tool::PasswordGenerator,
        Tool::ColorPicker,
        Tool::QrCodeGenerator,
    ];

    pub fn all() -> &'static [Tool] {
        &Self::ALL
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::AgeCalculator => "Age Calculator",
            Tool::UnitConverter => "Unit Converter",
            Tool::EmiCalculator => "EMI Calculator",
            Tool::WordCounter => "Word Counter",
            Tool::TypingSpeedTester => "Typing Speed Tester",
            Tool::JsonFormatter => "JSON Formatter",
            Tool::Base64Encoder => "Base64 Encoder",
            Tool::MetaGenerator => "Meta Tag Generator",
            Tool::PasswordGenerator => "Password Generator",
            Tool::ColorPicker => "Color Picker",
            Tool::QrCodeGenerator => "QR Code Generator",
        }
    }

    /// URL path segment without the leading slash.
    pub fn slug(self) -> &'static str {
        match self {
            Tool::AgeCalculator => "age-calculator",
            Tool::UnitConverter => "unit-converter",
            Tool::EmiCalculator => "emi-calculator",
            Tool::WordCounter => "word-counter",
            Tool::TypingSpeedTester => "typing-speed-tester",
            Tool::JsonFormatter => "json-formatter",
            Tool::Base64Encoder => "base64-encoder",
            Tool::MetaGenerator => "meta-generator",
            Tool::PasswordGenerator => "password-generator",
            Tool::ColorPicker => "color-picker",
            Tool::QrCodeGenerator => "qr-code-generator",
        }
    }

    pub fn route(self) -> String {
        format!("/{}", self.slug())
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::AgeCalculator => "Find your exact age in years, months and days",
            Tool::UnitConverter => "Convert length, weight and temperature units",
            Tool::EmiCalculator => "Work out monthly loan installments and total interest",
            Tool::WordCounter => "Count words, characters, sentences and paragraphs",
            Tool::TypingSpeedTester => "Measure typing speed and accuracy",
            Tool::JsonFormatter => "Format, minify and validate JSON",
            Tool::Base64Encoder => "Encode text to Base64 and back",
            Tool::MetaGenerator => "Generate HTML meta tags for a page",
            Tool::PasswordGenerator => "Create strong random passwords",
            Tool::ColorPicker => "Convert colors between HEX, RGB and HSL",
            Tool::QrCodeGenerator => "Create QR codes for links, Wi-Fi, contacts and more",
        }
    }

    pub fn category(self) -> ToolCategory {
        match self {
            Tool::WordCounter | Tool::TypingSpeedTester => ToolCategory::Text,
            Tool::JsonFormatter
            | Tool::Base64Encoder
            | Tool::MetaGenerator
            | Tool::PasswordGenerator => ToolCategory::Code,
            Tool::ColorPicker | Tool::QrCodeGenerator => ToolCategory::Image,
            Tool::AgeCalculator | Tool::UnitConverter | Tool::EmiCalculator => {
                ToolCategory::Calculators
            }
        }
    }

    /// Look a tool up by route. The leading slash and a trailing slash are
    /// optional, and a category prefix such as `/text/word-counter` is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::UnknownTool`] if no tool has that slug.
    pub fn from_route(route: &str) -> Result<Tool> {
        let slug = route
            .trim()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        Self::ALL
            .iter()
            .copied()
            .find(|tool| tool.slug().eq_ignore_ascii_case(slug))
            .ok_or_else(|| ToolkitError::UnknownTool(route.to_string()))
    }

    /// Tools in `category`, in catalogue order.
    pub fn in_category(category: ToolCategory) -> impl Iterator<Item = Tool> {
        Self::ALL.into_iter().filter(move |t| t.category() == category)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self> {
        Tool::from_route(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugs_are_unique() {
        let slugs: HashSet<_> = Tool::all().iter().map(|t| t.slug()).collect();
        assert_eq!(slugs.len(), Tool::all().len());
    }

    #[test]
    fn test_from_route_round_trips() {
        for &tool in Tool::all() {
            assert_eq!(Tool::from_route(&tool.route()).unwrap(), tool);
        }
    }

    #[test]
    fn test_from_route_variants() {
        assert_eq!(Tool::from_route("age-calculator").unwrap(), Tool::AgeCalculator);
        assert_eq!(Tool::from_route("/text/word-counter/").unwrap(), Tool::WordCounter);
        assert_eq!(Tool::from_route("/QR-Code-Generator").unwrap(), Tool::QrCodeGenerator);
    }

    #[test]
    fn test_unknown_route() {
        let err = Tool::from_route("/pdf-to-word").unwrap_err();
        assert_eq!(err, ToolkitError::UnknownTool("/pdf-to-word".into()));
    }

    #[test]
    fn test_categories() {
        let calculators: Vec<_> = Tool::in_category(ToolCategory::Calculators).collect();
        assert_eq!(
            calculators,
            [Tool::AgeCalculator, Tool::UnitConverter, Tool::EmiCalculator]
        );
        assert_eq!(Tool::ColorPicker.category().label(), "Image Tools");
    }
}
