//! Random password generation and a simple strength meter.
//!
//! The generator takes the RNG as a parameter; production callers pass
//! `rand::thread_rng()`, tests pass a seeded `StdRng`.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ToolkitError};

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 32;
pub const DEFAULT_LENGTH: usize = 12;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const NUMBERS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Generator settings: length and which character classes to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
        }
    }
}

impl PasswordOptions {
    /// The characters a password may contain, in class order
    /// lowercase, uppercase, numbers, symbols.
    pub fn charset(&self) -> String {
        [
            (self.lowercase, LOWERCASE),
            (self.uppercase, UPPERCASE),
            (self.numbers, NUMBERS),
            (self.symbols, SYMBOLS),
        ]
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, chars)| *chars)
        .collect()
    }

    /// Number of enabled character classes (0-4).
    pub fn variety(&self) -> usize {
        [self.uppercase, self.lowercase, self.numbers, self.symbols]
            .iter()
            .filter(|enabled| **enabled)
            .count()
    }

    fn validate(&self) -> Result<()> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(ToolkitError::PasswordLength {
                min: MIN_LENGTH,
                max: MAX_LENGTH,
                got: self.length,
            });
        }
        if self.variety() == 0 {
            return Err(ToolkitError::NoCharacterSet);
        }
        Ok(())
    }
}

/// Draw a password of `options.length` characters uniformly from the enabled classes.
///
/// # Errors
///
/// Returns [`ToolkitError::PasswordLength`] if the length is outside
/// 4-32, or [`ToolkitError::NoCharacterSet`] if every class is disabled.
pub fn generate<R: Rng + ?Sized>(options: &PasswordOptions, rng: &mut R) -> Result<String> {
    options.validate()?;
    let charset: Vec<char> = options.charset().chars().collect();
    let password: String = (0..options.length)
        .map(|_| charset[rng.gen_range(0..charset.len())])
        .collect();
    debug!(length = options.length, pool = charset.len(), "generated password");
    Ok(password)
}

/// Strength score (0-100) of a password generated with `options`.
///
/// Length contributes up to 50 points (full marks at 32 characters) and
/// each enabled character class 12.5 points. Settings that cannot produce
/// a password score 0.
pub fn strength(options: &PasswordOptions) -> u8 {
    if options.validate().is_err() {
        return 0;
    }
    let length_points = (options.length as f64 / MAX_LENGTH as f64 * 50.0).min(50.0);
    let variety_points = options.variety() as f64 * 12.5;
    (length_points + variety_points).floor().min(100.0) as u8
}

/// Verbal bucket for a strength score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strength {
    None,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Strength::None,
            1..=39 => Strength::Weak,
            40..=69 => Strength::Moderate,
            70..=89 => Strength::Strong,
            _ => Strength::VeryStrong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::None => "No password",
            Strength::Weak => "Weak",
            Strength::Moderate => "Moderate",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_default_options() {
        let options = PasswordOptions::default();
        assert_eq!(options.length, 12);
        assert_eq!(options.variety(), 4);
        assert_eq!(options.charset().len(), 26 + 26 + 10 + SYMBOLS.len());
    }

    #[test]
    fn test_generate_respects_length() {
        for length in [MIN_LENGTH, DEFAULT_LENGTH, MAX_LENGTH] {
            let options = PasswordOptions {
                length,
                ..Default::default()
            };
            let password = generate(&options, &mut rng()).unwrap();
            assert_eq!(password.chars().count(), length);
        }
    }

    #[test]
    fn test_generate_uses_only_enabled_classes() {
        let options = PasswordOptions {
            length: 32,
            uppercase: false,
            lowercase: false,
            numbers: true,
            symbols: false,
        };
        let password = generate(&options, &mut rng()).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_digit()), "got {password}");
    }

    #[test]
    fn test_generate_is_deterministic_for_seed() {
        let options = PasswordOptions::default();
        let a = generate(&options, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(&options, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_classes_is_error() {
        let options = PasswordOptions {
            uppercase: false,
            lowercase: false,
            numbers: false,
            symbols: false,
            ..Default::default()
        };
        let err = generate(&options, &mut rng()).unwrap_err();
        assert_eq!(err, ToolkitError::NoCharacterSet);
        assert_eq!(err.to_string(), "Select at least one option");
    }

    #[test]
    fn test_length_out_of_range_is_error() {
        for length in [0, 3, 33] {
            let options = PasswordOptions {
                length,
                ..Default::default()
            };
            assert!(matches!(
                generate(&options, &mut rng()),
                Err(ToolkitError::PasswordLength { .. })
            ));
        }
    }

    #[test]
    fn test_strength_scores() {
        assert_eq!(strength(&PasswordOptions::default()), 68);
        let max = PasswordOptions {
            length: 32,
            ..Default::default()
        };
        assert_eq!(strength(&max), 100);
        let weak = PasswordOptions {
            length: 4,
            uppercase: false,
            numbers: false,
            symbols: false,
            ..Default::default()
        };
        assert_eq!(strength(&weak), 18);
    }

    #[test]
    fn test_strength_of_unusable_options_is_zero() {
        let none = PasswordOptions {
            uppercase: false,
            lowercase: false,
            numbers: false,
            symbols: false,
            ..Default::default()
        };
        assert_eq!(strength(&none), 0);
    }

    #[test]
    fn test_strength_labels() {
        assert_eq!(Strength::from_score(0).label(), "No password");
        assert_eq!(Strength::from_score(18).label(), "Weak");
        assert_eq!(Strength::from_score(68).label(), "Moderate");
        assert_eq!(Strength::from_score(70).label(), "Strong");
        assert_eq!(Strength::from_score(90).label(), "Very Strong");
    }
}
