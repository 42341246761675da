//! Pricing calculator
//!
//! Exact decimal arithmetic over the cart subtotal and two percentages:
//!
//! ```text
//! discount_amount = subtotal × discount% / 100
//! tax_amount      = (subtotal − discount_amount) × tax% / 100
//! grand_total     = subtotal − discount_amount + tax_amount
//! ```
//!
//! Nothing is rounded here; [`round_money`] is applied only when a figure is
//! written into an order request.

use rust_decimal::prelude::*;

use crate::cart::Cart;

/// Rounding for monetary values on the wire (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Clamp a percentage into `[0, 100]`
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Convert raw user input into a clamped percentage; NaN and infinities become 0.
pub fn percent_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    clamp_percent(Decimal::from_f64(value).unwrap_or_default())
}

/// Round a monetary value for the order request
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Discount and tax percentages, always within `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PricingAdjustment {
    discount_percent: Decimal,
    tax_percent: Decimal,
}

impl PricingAdjustment {
    pub fn new(discount_percent: Decimal, tax_percent: Decimal) -> Self {
        Self {
            discount_percent: clamp_percent(discount_percent),
            tax_percent: clamp_percent(tax_percent),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    pub fn tax_percent(&self) -> Decimal {
        self.tax_percent
    }

    pub fn set_discount_percent(&mut self, value: Decimal) {
        self.discount_percent = clamp_percent(value);
    }

    pub fn set_tax_percent(&mut self, value: Decimal) {
        self.tax_percent = clamp_percent(value);
    }
}

/// Derived totals for one cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingSummary {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
}

/// Totals for a subtotal under an adjustment
pub fn calculate(subtotal: Decimal, adjustment: &PricingAdjustment) -> PricingSummary {
    let discount_amount = subtotal * adjustment.discount_percent() / Decimal::ONE_HUNDRED;
    let taxable = subtotal - discount_amount;
    let tax_amount = taxable * adjustment.tax_percent() / Decimal::ONE_HUNDRED;
    PricingSummary {
        subtotal,
        discount_amount,
        tax_amount,
        grand_total: taxable + tax_amount,
    }
}

/// Totals for the current cart contents
pub fn summarize(cart: &Cart, adjustment: &PricingAdjustment) -> PricingSummary {
    calculate(cart.subtotal(), adjustment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_two_line_scenario() {
        // A: 100 × 2, B: 50 × 1, 10% off, 5% tax
        let adj = PricingAdjustment::new(Decimal::from(10), Decimal::from(5));
        let s = calculate(Decimal::from(250), &adj);
        assert_eq!(s.subtotal, dec("250"));
        assert_eq!(s.discount_amount, dec("25"));
        assert_eq!(s.tax_amount, dec("11.25"));
        assert_eq!(s.grand_total, dec("236.25"));
    }

    #[test]
    fn test_identity_holds_and_is_reproducible() {
        let subtotals = ["0", "0.01", "99.99", "250", "1234.56", "100000"];
        let percents = ["0", "2.5", "12.5", "33.33", "50", "100"];
        for s in subtotals {
            for d in percents {
                for t in percents {
                    let (s, d, t) = (dec(s), dec(d), dec(t));
                    let adj = PricingAdjustment::new(d, t);
                    let first = calculate(s, &adj);
                    let hundred = Decimal::ONE_HUNDRED;
                    let expected = s - (s * d / hundred) + ((s - s * d / hundred) * t / hundred);
                    assert_eq!(first.grand_total, expected);
                    assert_eq!(calculate(s, &adj), first);
                }
            }
        }
    }

    #[test]
    fn test_percentages_are_clamped() {
        let adj = PricingAdjustment::new(Decimal::from(-5), Decimal::from(150));
        assert_eq!(adj.discount_percent(), Decimal::ZERO);
        assert_eq!(adj.tax_percent(), Decimal::ONE_HUNDRED);

        assert_eq!(percent_from_f64(f64::NAN), Decimal::ZERO);
        assert_eq!(percent_from_f64(f64::INFINITY), Decimal::ZERO);
        assert_eq!(percent_from_f64(101.0), Decimal::ONE_HUNDRED);
        assert_eq!(percent_from_f64(7.5), dec("7.5"));
    }

    #[test]
    fn test_full_discount_zeroes_total() {
        let adj = PricingAdjustment::new(Decimal::ONE_HUNDRED, Decimal::from(18));
        let s = calculate(Decimal::from(480), &adj);
        assert_eq!(s.grand_total, Decimal::ZERO);
        assert_eq!(s.tax_amount, Decimal::ZERO);
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(dec("10.005")), dec("10.01"));
        assert_eq!(round_money(dec("10.004")), dec("10.00"));
        assert_eq!(round_money(dec("236.25")), dec("236.25"));
    }
}
