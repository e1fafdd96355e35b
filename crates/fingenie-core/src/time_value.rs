use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::FinGenieError;
use crate::types::{Money, Months, Percent, Rate};
use crate::FinGenieResult;

/// Decimal places of the currency's minor unit.
pub const MONEY_DP: u32 = 2;

/// Largest principal, income or expense accepted (one quadrillion).
pub const MAX_AMOUNT: Money = dec!(1_000_000_000_000_000);

/// Highest annual rate accepted, in percent.
pub const MAX_ANNUAL_RATE: Percent = dec!(100);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Round half-up to `dp` decimal places.
///
/// Amounts in this crate are non-negative, so rounding away from zero at the
/// midpoint is the same as rounding half-up.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to the currency's minor unit (2 dp, half-up).
pub fn round_money(value: Money) -> Money {
    round_to(value, MONEY_DP)
}

/// Convert an annual percentage rate (8.5 = 8.5%) into a monthly fraction.
pub fn monthly_rate(annual_rate: Percent) -> Rate {
    annual_rate / MONTHS_PER_YEAR / PERCENT
}

/// `(1 + rate)^nper`, reporting overflow as an invalid tenure.
pub fn growth_factor(rate: Rate, nper: Months) -> FinGenieResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| {
            FinGenieError::invalid(
                "tenure_months",
                format!("compounding over {nper} months overflows decimal precision"),
            )
        })
}

/// Level payment that retires `principal` over `nper` periods at `rate` per period.
///
/// Unrounded; callers round to the minor unit when the amount becomes a payment.
pub fn installment(principal: Money, rate: Rate, nper: Months) -> FinGenieResult<Money> {
    if nper == 0 {
        return Err(FinGenieError::invalid(
            "tenure_months",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = growth_factor(rate, nper)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        // Rate too small to register at 28 significant digits.
        return Ok(principal / Decimal::from(nper));
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .map(|v| v / denominator)
        .ok_or_else(|| FinGenieError::invalid("principal", "installment overflows decimal precision"))
}

/// Present value of `nper` level payments of `payment` at `rate` per period.
pub fn present_value(payment: Money, rate: Rate, nper: Months) -> FinGenieResult<Money> {
    if rate.is_zero() {
        return payment
            .checked_mul(Decimal::from(nper))
            .ok_or_else(|| FinGenieError::invalid("payment", "present value overflows decimal precision"));
    }

    let factor = growth_factor(rate, nper)?;
    let annuity_factor = (Decimal::ONE - Decimal::ONE / factor) / rate;
    payment
        .checked_mul(annuity_factor)
        .ok_or_else(|| FinGenieError::invalid("payment", "present value overflows decimal precision"))
}
