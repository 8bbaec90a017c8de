use super::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Currency used when none is given.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A non-negative monetary amount tagged with its currency.
///
/// Wraps `rust_decimal::Decimal` so that arithmetic stays exact. Values are
/// immutable: every operation returns a new `Money`. Two values are equal when
/// both amount and currency match, and values in different currencies are never
/// comparable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRecord")]
pub struct Money {
    amount: Decimal,
    currency: String,
}

/// Unvalidated shape used when reading `Money` back from storage.
#[derive(Deserialize)]
struct MoneyRecord {
    amount: Decimal,
    currency: String,
}

impl TryFrom<MoneyRecord> for Money {
    type Error = DomainError;

    fn try_from(record: MoneyRecord) -> Result<Self, Self::Error> {
        Self::new(record.amount, record.currency)
    }
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Result<Self, DomainError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::InvalidAmount(amount.to_string()));
        }
        // Drop the sign of a negative zero.
        let amount = if amount.is_zero() { amount.abs() } else { amount };
        Ok(Self {
            amount,
            currency: currency.into(),
        })
    }

    /// Shorthand for an amount in the default currency.
    pub fn usd(amount: Decimal) -> Result<Self, DomainError> {
        Self::new(amount, DEFAULT_CURRENCY)
    }

    pub fn zero(currency: impl Into<String>) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency: currency.into(),
        }
    }

    /// Builds a `Money` from a float through its shortest decimal text form,
    /// so `0.1` becomes exactly `0.1` rather than the nearest binary fraction.
    pub fn from_f64(amount: f64, currency: impl Into<String>) -> Result<Self, DomainError> {
        if !amount.is_finite() {
            return Err(DomainError::InvalidAmount(amount.to_string()));
        }
        let text = amount.to_string();
        let exact = Decimal::from_str_exact(&text).map_err(|_| DomainError::InvalidAmount(text))?;
        Self::new(exact, currency)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn add(&self, other: &Money) -> Result<Money, DomainError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(DomainError::AmountOverflow)?;
        Self::new(amount, self.currency.clone())
    }

    pub fn multiply(&self, scalar: Decimal) -> Result<Money, DomainError> {
        let amount = self
            .amount
            .checked_mul(scalar)
            .ok_or(DomainError::AmountOverflow)?;
        Self::new(amount, self.currency.clone())
    }

    pub(crate) fn ensure_same_currency(&self, other: &Money) -> Result<(), DomainError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(DomainError::CurrencyMismatch {
                expected: self.currency.clone(),
                found: other.currency.clone(),
            })
        }
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.currency == other.currency).then(|| self.amount.cmp(&other.amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount.normalize(), self.currency)
    }
}
