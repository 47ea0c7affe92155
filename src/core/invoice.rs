//! Invoice arithmetic helpers.
//!
//! Type A invoices discriminate IVA: the stored price is tax-inclusive and
//! gets split into a subtotal and a 21% tax amount. All monetary values are
//! rounded to two decimals at this boundary.

/// IVA rate applied to type A invoices.
pub const IVA_RATE: f64 = 0.21;

/// Rounds a monetary amount to two decimals.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Splits a tax-inclusive price into `(subtotal, tax)` for a type A invoice.
///
/// The subtotal is the price divided by `1 + IVA_RATE`, rounded to cents;
/// the tax is the remainder, so `subtotal + tax == price` holds exactly
/// after rounding and `tax ≈ subtotal * 0.21` within a cent.
#[must_use]
pub fn iva_breakdown(price: f64) -> (f64, f64) {
    let subtotal = round2(price / (1.0 + IVA_RATE));
    let tax = round2(price - subtotal);
    (subtotal, tax)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(826.446_280_991), 826.45);
        assert_eq!(round2(173.553_719_008), 173.55);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(-0.004), -0.0);
    }

    #[test]
    fn test_iva_breakdown_reference_price() {
        // price = 1000 -> subtotal 826.45, tax 173.55
        let (subtotal, tax) = iva_breakdown(1000.0);
        assert_eq!(subtotal, 826.45);
        assert_eq!(tax, 173.55);
    }

    #[test]
    fn test_iva_breakdown_parts_sum_to_price() {
        for price in [0.0, 1.0, 99.99, 1000.0, 5000.0, 123_456.78] {
            let (subtotal, tax) = iva_breakdown(price);
            assert_eq!(round2(subtotal + tax), round2(price));
        }
    }

    #[test]
    fn test_iva_breakdown_tax_matches_rate() {
        let (subtotal, tax) = iva_breakdown(5000.0);
        // Within a cent of subtotal * 0.21
        assert!((tax - subtotal * IVA_RATE).abs() < 0.01);
    }
}
