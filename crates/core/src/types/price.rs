//! Whole-rupee price representation.
//!
//! Catalog prices carry no minor unit, so a price is a plain `u64` amount of
//! Indian rupees. Display uses the Indian digit grouping (`₹1,23,456`).

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A price in whole rupees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(0);

    /// Currency symbol used when displaying prices.
    pub const SYMBOL: &'static str = "₹";

    /// Create a new price from a rupee amount.
    #[must_use]
    pub const fn new(rupees: u64) -> Self {
        Self(rupees)
    }

    /// Get the rupee amount.
    #[must_use]
    pub const fn rupees(self) -> u64 {
        self.0
    }

    /// Multiply by a quantity, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// The amount with Indian digit grouping, without the currency symbol.
    ///
    /// ```rust
    /// # use flutter_store_core::Price;
    /// assert_eq!(Price::new(799).grouped(), "799");
    /// assert_eq!(Price::new(1999).grouped(), "1,999");
    /// assert_eq!(Price::new(123_456).grouped(), "1,23,456");
    /// ```
    #[must_use]
    pub fn grouped(self) -> String {
        let digits = self.0.to_string();
        if digits.len() <= 3 {
            return digits;
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (front, pair) = rest.split_at(rest.len() - 2);
            groups.push(pair);
            rest = front;
        }
        groups.push(rest);
        groups.reverse();

        format!("{},{tail}", groups.join(","))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::SYMBOL, self.grouped())
    }
}

impl From<u64> for Price {
    fn from(rupees: u64) -> Self {
        Self(rupees)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_short_amounts() {
        assert_eq!(Price::new(0).grouped(), "0");
        assert_eq!(Price::new(999).grouped(), "999");
    }

    #[test]
    fn test_grouped_indian_lakh_and_crore() {
        assert_eq!(Price::new(1000).grouped(), "1,000");
        assert_eq!(Price::new(12_345).grouped(), "12,345");
        assert_eq!(Price::new(1_00_000).grouped(), "1,00,000");
        assert_eq!(Price::new(12_34_56_789).grouped(), "12,34,56,789");
    }

    #[test]
    fn test_display_includes_symbol() {
        assert_eq!(Price::new(2799).to_string(), "₹2,799");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::new(799).times(2), Price::new(1999)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(3597));
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }
}
