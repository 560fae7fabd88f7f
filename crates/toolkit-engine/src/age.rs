//! Calendar-aware age computation.
//!
//! Turns three raw form fields (day, month, year) into a validated birth
//! date and measures the time elapsed since then. All functions take the
//! reference "today"/"now" explicitly; nothing in this module reads the
//! system clock, so results are reproducible in tests.
//!
//! # Functions
//!
//! - [`validate_birth_date`] — run the full validation chain over raw fields
//! - [`age_between`] — years/months/days with borrow/carry
//! - [`extended_age`] — fixed-ratio weeks/days/hours/minutes/seconds
//! - [`born_on`] — the long-form date line shown under the result
//! - [`AgeForm`] — the form record: named setters, calculate, reset
//!
//! # Validation order
//!
//! The first failing check wins:
//!
//! 1. any field blank → [`ToolkitError::IncompleteDate`]
//! 2. any field not a number → [`ToolkitError::InvalidNumber`]
//! 3. month outside 1-12 → [`ToolkitError::MonthRange`]
//! 4. day outside 1-31 → [`ToolkitError::DayRange`]
//! 5. year outside 1900-current → [`ToolkitError::YearRange`]
//! 6. no such calendar date (e.g. 31 April) → [`ToolkitError::InvalidDate`]
//! 7. date after today → [`ToolkitError::FutureDate`]

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ToolkitError};

/// Earliest accepted birth year.
pub const MIN_YEAR: i32 = 1900;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

// ── Date components ─────────────────────────────────────────────────────────

/// Range-checked day/month/year, not yet checked against the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateComponents {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl DateComponents {
    /// Parse and range-check raw form fields (validation steps 1-5).
    ///
    /// `current_year` bounds the year field from above.
    pub fn parse(day: &str, month: &str, year: &str, current_year: i32) -> Result<Self> {
        if [day, month, year].iter().any(|f| f.trim().is_empty()) {
            return Err(ToolkitError::IncompleteDate);
        }

        let (Some(day), Some(month), Some(year)) =
            (parse_int(day), parse_int(month), parse_int(year))
        else {
            return Err(ToolkitError::InvalidNumber);
        };

        if !(1..=12).contains(&month) {
            return Err(ToolkitError::MonthRange);
        }
        if !(1..=31).contains(&day) {
            return Err(ToolkitError::DayRange);
        }
        if !(i64::from(MIN_YEAR)..=i64::from(current_year)).contains(&year) {
            return Err(ToolkitError::YearRange { current_year });
        }

        // All three are inside small ranges now, so the narrowing casts are exact.
        Ok(Self {
            day: day as u32,
            month: month as u32,
            year: year as i32,
        })
    }

    /// Build the calendar date (validation step 6).
    ///
    /// chrono refuses to construct dates like 30 February instead of rolling
    /// them into the next month, so a missing date means the components
    /// would not survive a round trip through the calendar.
    pub fn to_date(self) -> Result<NaiveDate> {
        let date =
            NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or(ToolkitError::InvalidDate)?;
        if date.day() != self.day || date.month() != self.month || date.year() != self.year {
            return Err(ToolkitError::InvalidDate);
        }
        Ok(date)
    }
}

/// Lenient integer parsing for form fields.
///
/// Accepts optional surrounding whitespace, an optional sign and base-10
/// digits; anything after the leading digits is ignored (`"12abc"` → 12).
/// Returns `None` when there are no leading digits. Overflow saturates, which
/// the range checks then reject.
fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Run the whole validation chain over raw form fields.
///
/// # Errors
///
/// Returns the first failing check, in the order listed in the module docs.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use toolkit_engine::age::validate_birth_date;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// let birth = validate_birth_date("29", "2", "2024", today).unwrap();
/// assert_eq!(birth, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
///
/// let err = validate_birth_date("29", "2", "2023", today).unwrap_err();
/// assert_eq!(err.to_string(), "Invalid date");
/// ```
pub fn validate_birth_date(day: &str, month: &str, year: &str, today: NaiveDate) -> Result<NaiveDate> {
    let components = DateComponents::parse(day, month, year, today.year())?;
    let birth = components.to_date()?;
    if birth > today {
        return Err(ToolkitError::FutureDate);
    }
    Ok(birth)
}

// ── Basic age ───────────────────────────────────────────────────────────────

/// Elapsed calendar time as whole years, months and remaining days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AgeResult {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

/// Compute the age on `today` of someone born on `birth`.
///
/// Subtracts field by field, then resolves deficits by borrowing: a negative
/// day count borrows the length of the month before `today`, a negative
/// month count borrows twelve months from the years.
///
/// If the borrowed count is still negative (born on the 31st, today is the
/// 1st and the preceding month is February) it is clamped to zero. When the
/// birth day exists in the preceding month the result satisfies
/// `birth + (years*12 + months) months + days == today` exactly; otherwise it
/// lands up to three days short of `today`.
///
/// # Errors
///
/// Returns [`ToolkitError::FutureDate`] if `birth` is after `today`.
pub fn age_between(birth: NaiveDate, today: NaiveDate) -> Result<AgeResult> {
    if birth > today {
        return Err(ToolkitError::FutureDate);
    }

    let mut years = today.year() - birth.year();
    let mut months = today.month() as i32 - birth.month() as i32;
    let mut days = today.day() as i32 - birth.day() as i32;

    if days < 0 {
        months -= 1;
        days += days_in_preceding_month(today) as i32;
        days = days.max(0);
    }

    if months < 0 {
        years -= 1;
        months += 12;
    }

    debug!(%birth, %today, years, months, days, "computed age");

    Ok(AgeResult {
        years: years as u32,
        months: months as u32,
        days: days as u32,
    })
}

/// Number of days in the month before the one containing `date`.
fn days_in_preceding_month(date: NaiveDate) -> u32 {
    // Day 0 of this month, i.e. the last day of the previous one.
    date.with_day(1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

// ── Extended age ────────────────────────────────────────────────────────────

/// Elapsed time expressed in several units at once.
///
/// `weeks`, `days`, `hours`, `minutes` and `seconds` are each the whole
/// elapsed span floored to that unit (not a decomposition), computed from the
/// elapsed seconds with fixed ratios and no calendar awareness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExtendedAge {
    /// Calendar years, same as [`AgeResult::years`].
    pub years: u32,
    /// `(now.year - birth.year) * 12 + (now.month - birth.month)`, without a
    /// day-level borrow. Can exceed the basic variant's total months by one.
    pub months: u64,
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Compute the extended age at instant `now` for a birth at midnight on `birth`.
///
/// # Errors
///
/// Returns [`ToolkitError::FutureDate`] if `birth` is after `now`'s date.
pub fn extended_age(birth: NaiveDate, now: NaiveDateTime) -> Result<ExtendedAge> {
    let basic = age_between(birth, now.date())?;

    let total_seconds = (now - birth.and_time(chrono::NaiveTime::MIN)).num_seconds();
    // birth <= now.date() was checked above, so the span is non-negative.
    let total_seconds = total_seconds.max(0);

    let days = total_seconds / SECONDS_PER_DAY;
    let month_delta = (i64::from(now.year()) - i64::from(birth.year())) * 12
        + (i64::from(now.month()) - i64::from(birth.month()));

    Ok(ExtendedAge {
        years: basic.years,
        months: month_delta.max(0) as u64,
        weeks: (days / 7) as u64,
        days: days as u64,
        hours: (total_seconds / SECONDS_PER_HOUR) as u64,
        minutes: (total_seconds / SECONDS_PER_MINUTE) as u64,
        seconds: total_seconds as u64,
    })
}

/// The long-form date shown under a result (e.g. `"Saturday, January 1, 2000"`).
pub fn born_on(birth: NaiveDate) -> String {
    birth.format("%A, %B %-d, %Y").to_string()
}

// ── Form record ─────────────────────────────────────────────────────────────

/// The age calculator form.
///
/// Holds the three raw text fields and the outcome of the last calculation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgeForm {
    day: String,
    month: String,
    year: String,
    age: Option<AgeResult>,
    error: Option<ToolkitError>,
}

impl AgeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_day(&mut self, day: impl Into<String>) {
        self.day = day.into();
    }

    pub fn set_month(&mut self, month: impl Into<String>) {
        self.month = month.into();
    }

    pub fn set_year(&mut self, year: impl Into<String>) {
        self.year = year.into();
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    /// Validate the fields and compute the age on `today`.
    ///
    /// The outcome is also kept on the form: a success clears any previous
    /// error message, a failure clears any previous result.
    pub fn calculate(&mut self, today: NaiveDate) -> Result<AgeResult> {
        let outcome = validate_birth_date(&self.day, &self.month, &self.year, today)
            .and_then(|birth| age_between(birth, today));
        match &outcome {
            Ok(age) => {
                self.age = Some(*age);
                self.error = None;
            }
            Err(err) => {
                self.age = None;
                self.error = Some(err.clone());
            }
        }
        outcome
    }

    /// The last successful result, if the last calculation succeeded.
    pub fn age(&self) -> Option<&AgeResult> {
        self.age.as_ref()
    }

    /// The message of the last failed calculation, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Clear every field and the derived result.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
