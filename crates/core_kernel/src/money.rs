//! Money types with precise decimal arithmetic
//!
//! Ledger figures are kept as `rust_decimal::Decimal` so that sums of
//! commissions, unit costs and taxes never pick up binary floating-point
//! drift. Display is fixed-point with the currency's decimal places.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
            Currency::EUR => "€",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount with associated currency
///
/// Amounts keep the full precision they were created with; rounding to the
/// currency's 2 places only happens at display time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a Brazilian real amount
    pub fn brl(amount: Decimal) -> Self {
        Self::new(amount, Currency::BRL)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Rounds half away from zero to the currency's decimal places
    pub fn round_to_currency(&self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                self.currency.decimal_places(),
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        }
    }

    /// Formats the bare amount with exactly the currency's decimal places,
    /// e.g. `747.00`. This is the form used in audit lines and reports.
    pub fn fixed(&self) -> String {
        let dp = self.currency.decimal_places();
        format!("{:.dp$}", self.round_to_currency().amount, dp = dp as usize)
    }

    /// Checked addition that returns an error on currency mismatch or overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch or overflow
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self.amount.checked_sub(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Multiplies by a scalar (e.g., for rate calculations)
    pub fn checked_mul(&self, factor: Decimal) -> Result<Money, MoneyError> {
        let amount = self.amount.checked_mul(factor).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Sums an iterator of amounts in a single currency
    ///
    /// An empty iterator sums to zero in `currency`.
    pub fn try_sum<'a, I>(items: I, currency: Currency) -> Result<Money, MoneyError>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        items
            .into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency.symbol(), self.fixed())
    }
}

/// A percentage rate (e.g., tax rate)
///
/// Serialized as its bare decimal value, so `0.16` in a config file is 16%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate {
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.16 for 16%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Rejects rates outside `0..=1`
    pub fn validate(&self) -> Result<(), MoneyError> {
        if self.value.is_sign_negative() && !self.value.is_zero() {
            return Err(MoneyError::InvalidRate(format!("{} is negative", self)));
        }
        if self.value > Decimal::ONE {
            return Err(MoneyError::InvalidRate(format!("{} exceeds 100%", self)));
        }
        Ok(())
    }

    /// Applies this rate to a money amount
    pub fn apply(&self, money: &Money) -> Result<Money, MoneyError> {
        money.checked_mul(self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}
