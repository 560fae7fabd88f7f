//! JSON validation, pretty-printing and minification.
//!
//! Object keys keep their input order (`serde_json` with `preserve_order`),
//! so beautifying a document never reshuffles it.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, ToolkitError};

/// Sample document offered by the "Load Example" action.
pub const EXAMPLE_JSON: &str = r#"{
  "name": "JSON Formatter",
  "description": "A tool to format and validate JSON",
  "version": "1.0.0",
  "features": [
    "Formatting",
    "Validation",
    "Minification",
    "Error highlighting"
  ],
  "metadata": {
    "author": "ToolKit Pro",
    "license": "MIT"
  }
}"#;

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    /// Two-space indentation, one member per line.
    #[default]
    Pretty,
    /// No insignificant whitespace.
    Minified,
}

impl FormatStyle {
    /// The other style (the Beautify/Minify toggle).
    pub fn toggled(self) -> Self {
        match self {
            FormatStyle::Pretty => FormatStyle::Minified,
            FormatStyle::Minified => FormatStyle::Pretty,
        }
    }
}

/// Parse `input` and re-serialize it in `style`.
///
/// Blank input is not an error; it simply has no output.
///
/// # Errors
///
/// Returns [`ToolkitError::InvalidJson`] with the 1-based line and column of
/// the first syntax error.
///
/// # Examples
///
/// ```
/// use toolkit_engine::json_format::{format_json, FormatStyle};
///
/// let out = format_json(r#"{ "b": 1, "a": [true, null] }"#, FormatStyle::Minified).unwrap();
/// assert_eq!(out.as_deref(), Some(r#"{"b":1,"a":[true,null]}"#));
/// ```
pub fn format_json(input: &str, style: FormatStyle) -> Result<Option<String>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    let value = parse(input)?;
    let rendered = match style {
        FormatStyle::Pretty => serde_json::to_string_pretty(&value),
        FormatStyle::Minified => serde_json::to_string(&value),
    }
    .map_err(|e| ToolkitError::InvalidJson {
        line: 0,
        column: 0,
        message: e.to_string(),
    })?;
    Ok(Some(rendered))
}

/// Check that `input` is a single well-formed JSON document.
pub fn validate_json(input: &str) -> Result<()> {
    parse(input).map(|_| ())
}

fn parse(input: &str) -> Result<Value> {
    serde_json::from_str::<Value>(input).map_err(|e| ToolkitError::InvalidJson {
        line: e.line(),
        column: e.column(),
        message: strip_position(&e),
    })
}

/// serde_json appends " at line L column C" to its messages; the position is
/// reported through dedicated fields instead.
fn strip_position(err: &serde_json::Error) -> String {
    let message = err.to_string();
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message,
    }
}
