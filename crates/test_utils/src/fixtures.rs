//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities across the billing portal.
//! Fixtures are consistent and predictable so unit tests can assert on
//! exact figures.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard INR amount
    pub fn inr_10k() -> Money {
        Money::inr(dec!(10000))
    }

    /// An annual license value that pro-rates to a round monthly figure
    pub fn annual_license() -> Money {
        Money::inr(dec!(120000))
    }

    /// A typical one-time implementation fee
    pub fn one_time_fee() -> Money {
        Money::inr(dec!(24000))
    }

    /// A purchase order ceiling
    pub fn po_ceiling() -> Money {
        Money::inr(dec!(100000))
    }

    /// A zero INR amount
    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// A USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// First day of FY2024-25
    pub fn fy_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date")
    }

    /// Last day of FY2024-25
    pub fn fy_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 31).expect("valid date")
    }

    /// A reference "today" inside FY2024-25 Q1
    pub fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
    }

    /// An invoice date early in the financial year
    pub fn april_invoice() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).expect("valid date")
    }

    /// A payment date three weeks after [`Self::april_invoice`]
    pub fn may_payment() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    pub fn client_name() -> &'static str {
        "Acme Industries Pvt Ltd"
    }

    pub fn gstin() -> &'static str {
        "27AAPFU0939F1ZV"
    }

    pub fn po_number() -> &'static str {
        "PO-2024-001"
    }

    pub fn invoice_number() -> &'static str {
        "INV-2024-0042"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_license_prorates_cleanly() {
        assert_eq!(
            MoneyFixtures::annual_license().per_month(12).amount(),
            dec!(10000)
        );
    }

    #[test]
    fn test_as_of_falls_inside_fixture_fy() {
        let fy = core_kernel::FinancialYear::containing(TemporalFixtures::as_of());
        assert_eq!(fy.start(), TemporalFixtures::fy_start());
        assert_eq!(fy.end(), TemporalFixtures::fy_end());
    }
}
