//! Lending defaults applied by the engine.

use crate::fine::DEFAULT_FINE_RATE;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Loan period used when the caller does not pick one.
pub const DEFAULT_LOAN_DAYS: u32 = 14;

/// How long loans last and what lateness costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendingPolicy {
    /// Loan period for [`borrow_book`](crate::CirculationEngine::borrow_book)
    pub default_loan_days: u32,
    /// Fine per overdue day, used for returns and reports
    pub fine_rate: Decimal,
}

impl LendingPolicy {
    pub fn new(default_loan_days: u32, fine_rate: Decimal) -> Self {
        Self {
            default_loan_days,
            fine_rate,
        }
    }
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LOAN_DAYS, DEFAULT_FINE_RATE)
    }
}
