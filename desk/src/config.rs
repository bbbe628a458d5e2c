//! Configuration management for the desk.

use circulation_engine::{policy::DEFAULT_LOAN_DAYS, LendingPolicy};
use rust_decimal::Decimal;
use std::env;

/// Desk configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Loan period when the borrower does not ask for one
    pub loan_days: u32,
    /// Fine per overdue day
    pub fine_rate: Decimal,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let loan_days = match lookup("LOAN_DAYS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidLoanDays(raw))?,
            None => DEFAULT_LOAN_DAYS,
        };

        let fine_rate = match lookup("FINE_RATE") {
            Some(raw) => match raw.trim().parse::<Decimal>() {
                Ok(rate) if !rate.is_sign_negative() => rate,
                _ => return Err(ConfigError::InvalidFineRate(raw)),
            },
            None => LendingPolicy::default().fine_rate,
        };

        Ok(Self {
            loan_days,
            fine_rate,
        })
    }

    /// Lending policy for the engine.
    pub fn policy(&self) -> LendingPolicy {
        LendingPolicy::new(self.loan_days, self.fine_rate)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid LOAN_DAYS value: {0}")]
    InvalidLoanDays(String),

    #[error("Invalid FINE_RATE value: {0}")]
    InvalidFineRate(String),
}
