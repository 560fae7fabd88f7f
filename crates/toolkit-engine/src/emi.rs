//! Equated monthly installment (EMI) for a fixed-rate loan.
//!
//! `emi = P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate
//! (annual percent / 1200) and `n` the tenure in months, evaluated as
//! `P * r / (1 - (1 + r)^-n)` so the power cannot overflow. A zero rate
//! degenerates to straight division of the principal.

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ToolkitError};

/// Longest accepted tenure.
pub const MAX_TENURE_YEARS: f64 = 100.0;

/// Loan parameters as entered on the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Loan {
    /// Amount borrowed.
    pub principal: f64,
    /// Nominal annual interest rate in percent (8.5 means 8.5%).
    pub annual_rate_percent: f64,
    /// Tenure in years; fractional years are rounded to whole months.
    pub tenure_years: f64,
}

/// Monthly payment and loan totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmiResult {
    pub monthly_emi: f64,
    pub months: u32,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Installment {
    /// 1-based month number.
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Outstanding balance after this payment.
    pub balance: f64,
}

impl Loan {
    pub fn new(principal: f64, annual_rate_percent: f64, tenure_years: f64) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure_years,
        }
    }

    fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 1200.0
    }

    /// Check the inputs and return the tenure in whole months.
    fn validate(&self) -> Result<u32> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(ToolkitError::InvalidLoan(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(ToolkitError::InvalidLoan(format!(
                "interest rate must be zero or positive, got {}",
                self.annual_rate_percent
            )));
        }
        if !self.tenure_years.is_finite() || self.tenure_years <= 0.0 {
            return Err(ToolkitError::InvalidLoan(format!(
                "tenure must be positive, got {}",
                self.tenure_years
            )));
        }
        if self.tenure_years > MAX_TENURE_YEARS {
            return Err(ToolkitError::InvalidLoan(format!(
                "tenure must be at most {MAX_TENURE_YEARS} years, got {}",
                self.tenure_years
            )));
        }
        let months = (self.tenure_years * 12.0).round();
        if months < 1.0 {
            return Err(ToolkitError::InvalidLoan(format!(
                "tenure of {} years is not a whole number of months",
                self.tenure_years
            )));
        }
        Ok(months as u32)
    }

    /// Compute the monthly installment and the loan totals.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::InvalidLoan`] for a non-positive principal or
    /// tenure, a tenure over [`MAX_TENURE_YEARS`], a negative rate, non-finite
    /// input, or amounts too large to represent.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolkit_engine::emi::Loan;
    ///
    /// let result = Loan::new(100_000.0, 8.5, 5.0).emi().unwrap();
    /// assert_eq!(result.months, 60);
    /// assert!((result.monthly_emi - 2051.65).abs() < 0.01);
    /// ```
    pub fn emi(&self) -> Result<EmiResult> {
        let months = self.validate()?;
        let monthly_emi = monthly_payment(self.principal, self.monthly_rate(), months)?;
        let total_payment = monthly_emi * f64::from(months);
        if !total_payment.is_finite() {
            return Err(out_of_range());
        }

        debug!(
            principal = self.principal,
            rate = self.annual_rate_percent,
            months,
            monthly_emi,
            "computed EMI"
        );

        Ok(EmiResult {
            monthly_emi,
            months,
            total_payment,
            total_interest: total_payment - self.principal,
        })
    }

    /// Month-by-month split of each installment into interest and principal.
    ///
    /// # Errors
    ///
    /// Same as [`Loan::emi`].
    pub fn schedule(&self) -> Result<Vec<Installment>> {
        let months = self.validate()?;
        let rate = self.monthly_rate();
        let payment = monthly_payment(self.principal, rate, months)?;

        let mut balance = self.principal;
        let mut rows = Vec::with_capacity(months as usize);
        for month in 1..=months {
            let interest = balance * rate;
            let principal = payment - interest;
            balance -= principal;
            if month == months {
                // Absorb accumulated rounding so the loan closes at exactly zero.
                balance = 0.0;
            }
            rows.push(Installment {
                month,
                payment,
                principal,
                interest,
                balance,
            });
        }
        Ok(rows)
    }
}

fn monthly_payment(principal: f64, rate: f64, months: u32) -> Result<f64> {
    let n = f64::from(months);
    let payment = if rate == 0.0 {
        principal / n
    } else {
        principal * rate / (1.0 - (1.0 + rate).powf(-n))
    };
    if payment.is_finite() {
        Ok(payment)
    } else {
        Err(out_of_range())
    }
}

fn out_of_range() -> ToolkitError {
    ToolkitError::InvalidLoan("amounts are too large to compute".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emi_reference_loan() {
        let result = Loan::new(100_000.0, 8.5, 5.0).emi().unwrap();
        assert_eq!(result.months, 60);
        assert!((result.monthly_emi - 2051.65).abs() < 0.005, "got {}", result.monthly_emi);
        // Within a rupee of the commonly quoted ~2052 figure
        assert!((result.monthly_emi - 2052.25).abs() < 1.0);
    }

    #[test]
    fn test_emi_totals() {
        let result = Loan::new(100_000.0, 8.5, 5.0).emi().unwrap();
        assert!((result.total_payment - result.monthly_emi * 60.0).abs() < 1e-6);
        assert!((result.total_interest - (result.total_payment - 100_000.0)).abs() < 1e-6);
        assert!(result.total_interest > 0.0);
    }

    #[test]
    fn test_emi_zero_rate_is_straight_division() {
        let result = Loan::new(12_000.0, 0.0, 1.0).emi().unwrap();
        assert_eq!(result.monthly_emi, 1000.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_emi_fractional_tenure() {
        let result = Loan::new(30_000.0, 0.0, 2.5).emi().unwrap();
        assert_eq!(result.months, 30);
        assert_eq!(result.monthly_emi, 1000.0);
    }

    #[test]
    fn test_emi_rejects_bad_input() {
        assert!(Loan::new(0.0, 8.5, 5.0).emi().is_err());
        assert!(Loan::new(-5.0, 8.5, 5.0).emi().is_err());
        assert!(Loan::new(1000.0, -1.0, 5.0).emi().is_err());
        assert!(Loan::new(1000.0, 8.5, 0.0).emi().is_err());
        assert!(Loan::new(f64::NAN, 8.5, 5.0).emi().is_err());
        // Rounds to zero months
        let err = Loan::new(1000.0, 8.5, 0.01).emi().unwrap_err();
        assert!(err.to_string().contains("Invalid loan"), "got: {err}");
    }

    #[test]
    fn test_emi_rejects_tenure_over_limit() {
        let err = Loan::new(100_000.0, 8.5, 1.0e6).emi().unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidLoan(_)), "got: {err}");
        assert!(Loan::new(100_000.0, 8.5, 1.0e8).schedule().is_err());

        let longest = Loan::new(100_000.0, 8.5, MAX_TENURE_YEARS).emi().unwrap();
        assert_eq!(longest.months, 1200);
        assert!(longest.monthly_emi.is_finite());
        // Just above interest-only (100000 * 8.5 / 1200 = 708.33)
        assert!(
            longest.monthly_emi > 708.33 && longest.monthly_emi < 708.6,
            "got {}",
            longest.monthly_emi
        );
    }

    #[test]
    fn test_emi_rejects_unrepresentable_amounts() {
        let err = Loan::new(f64::MAX, 8.5, 30.0).emi().unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidLoan(_)), "got: {err}");
        assert!(Loan::new(1000.0, 1.0e308, 5.0).emi().is_err());
    }

    #[test]
    fn test_schedule_closes_loan() {
        let loan = Loan::new(100_000.0, 8.5, 5.0);
        let rows = loan.schedule().unwrap();
        assert_eq!(rows.len(), 60);
        assert_eq!(rows[0].month, 1);
        assert_eq!(rows.last().unwrap().balance, 0.0);

        let first_interest = 100_000.0 * 8.5 / 1200.0;
        assert!((rows[0].interest - first_interest).abs() < 1e-9);

        let principal_paid: f64 = rows.iter().map(|r| r.principal).sum();
        assert!((principal_paid - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_schedule_interest_decreases() {
        let rows = Loan::new(50_000.0, 12.0, 2.0).schedule().unwrap();
        for pair in rows.windows(2) {
            assert!(pair[1].interest < pair[0].interest);
            assert!(pair[1].principal > pair[0].principal);
        }
    }
}
