use bigdecimal::{BigDecimal, RoundingMode};

pub fn zero() -> BigDecimal {
    BigDecimal::from(0)
}

// Amounts are stored as NUMERIC(12, 2)
pub fn round_to_cents(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}

// Largest value a NUMERIC(12, 2) column holds
pub fn max_amount() -> BigDecimal {
    BigDecimal::new(999_999_999_999i64.into(), 2)
}

pub fn line_total(unit_price: &BigDecimal, quantity: i32) -> BigDecimal {
    unit_price * BigDecimal::from(quantity)
}
