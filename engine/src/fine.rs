//! Overdue and fine arithmetic.
//!
//! All functions here are pure: the caller supplies the current instant.

use crate::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy};

/// Milliseconds in one day.
pub const DAY_MILLIS: i64 = 86_400_000;

/// Fine charged per overdue day unless a policy says otherwise (0.50).
pub const DEFAULT_FINE_RATE: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

/// Whole days between `due_date` and `now`, rounded up.
///
/// Zero when the due date has not passed yet.
pub fn overdue_days(due_date: Timestamp, now: Timestamp) -> i64 {
    let late = now.signed_duration_since(due_date).num_milliseconds();
    if late <= 0 {
        return 0;
    }
    // ceil for a positive numerator
    (late - 1) / DAY_MILLIS + 1
}

/// Fine owed for a loan due at `due_date`, as of `now`.
///
/// No due date means nothing is owed.
pub fn calculate(due_date: Option<Timestamp>, now: Timestamp, fine_rate: Decimal) -> Decimal {
    match due_date {
        Some(due) => charge(overdue_days(due, now), fine_rate),
        None => Decimal::ZERO,
    }
}

/// `days * fine_rate`, rounded to cents.
///
/// Saturates at the largest representable amount instead of overflowing.
pub fn charge(days: i64, fine_rate: Decimal) -> Decimal {
    let amount = Decimal::from(days)
        .checked_mul(fine_rate)
        .unwrap_or_else(|| saturated(fine_rate.is_sign_negative()));
    round_cents(amount)
}

/// Sum of fines, rounded to cents, saturating like [`charge`].
pub fn total<I>(fines: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let sum = fines.into_iter().fold(Decimal::ZERO, |acc, fine| {
        acc.checked_add(fine)
            .unwrap_or_else(|| saturated(fine.is_sign_negative()))
    });
    round_cents(sum)
}

fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Round a monetary amount to two decimal places, halves away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
