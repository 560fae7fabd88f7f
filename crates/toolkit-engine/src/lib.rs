//! # toolkit-engine
//!
//! Pure computation behind the ToolKit Pro utilities.
//!
//! Every function takes its inputs explicitly, including "today" and any
//! random number generator, so results are deterministic and testable. No
//! function reads the system clock, touches the network or writes to disk.
//!
//! ## Modules
//!
//! - [`units`] — Length, weight and temperature conversion through a base unit
//! - [`age`] — Birth date validation, calendar age and extended age breakdown
//! - [`emi`] — Loan installment (EMI) and amortization schedule
//! - [`text`] — Word, sentence and paragraph counts with reading time
//! - [`json_format`] — Pretty-print, minify and validate JSON
//! - [`encoding`] — Base64 encode/decode of UTF-8 text
//! - [`color`] — HEX / RGB / HSL conversion and shade palettes
//! - [`password`] — Random password generation and strength scoring
//! - [`typing`] — Typing speed statistics and test sessions
//! - [`qr`] — QR payload builders and SVG / terminal rendering
//! - [`meta`] — HTML meta tag generation
//! - [`tools`] — Catalogue of tools and their routes
//! - [`error`] — Error types

pub mod age;
pub mod color;
pub mod emi;
pub mod encoding;
pub mod error;
pub mod json_format;
pub mod meta;
pub mod password;
pub mod qr;
pub mod text;
pub mod tools;
pub mod typing;
pub mod units;

pub use age::{
    age_between, born_on, extended_age, validate_birth_date, AgeForm, AgeResult, DateComponents,
    ExtendedAge,
};
pub use color::{Hsl, Rgb};
pub use emi::{EmiResult, Installment, Loan};
pub use error::{Result, ToolkitError};
pub use json_format::{format_json, validate_json, FormatStyle};
pub use meta::{MetaTag, MetaTags};
pub use password::{PasswordOptions, Strength};
pub use qr::{ErrorCorrection, QrContent, QrOptions, WifiEncryption};
pub use text::TextStats;
pub use tools::{Tool, ToolCategory};
pub use typing::{TypingPhase, TypingSession, TypingStats};
pub use units::{convert, convert_input, ConverterState, UnitCategory, UnitDefinition};
