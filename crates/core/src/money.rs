use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::bill::BillError;

/// A non-negative rupee amount, kept at the precision it was read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rupees(Decimal);

impl Rupees {
    pub fn new(amount: Decimal) -> Result<Self, BillError> {
        if amount.is_zero() {
            return Ok(Rupees(Decimal::ZERO));
        }
        if amount.is_sign_negative() {
            return Err(BillError::NegativeAmount(amount));
        }
        Ok(Rupees(amount))
    }

    pub fn from_whole(rupees: u64) -> Self {
        Rupees(Decimal::from(rupees))
    }

    pub fn zero() -> Self {
        Rupees(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0.normalize())
    }
}

/// Saturates at `Decimal::MAX` instead of overflowing.
impl Add for Rupees {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Rupees(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Rupees::zero(), |a, b| a + b)
    }
}

impl TryFrom<Decimal> for Rupees {
    type Error = BillError;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Rupees::new(value)
    }
}

impl From<Rupees> for Decimal {
    fn from(value: Rupees) -> Self {
        value.0
    }
}
