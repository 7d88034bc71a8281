//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that balances cancel out
//! exactly. Decimal values coming from the wire are rounded to the nearest
//! cent when they enter the system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount accepted from user input: ten thousand million
    ///
    /// Sums of accepted amounts stay far below `i64::MAX` cents.
    pub const MAX_AMOUNT: Money = Money(1_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use barbacoa_cli::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.units(), 10);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    /// Create a Money amount from a decimal value, rounding to the nearest cent
    ///
    /// # Examples
    /// ```
    /// use barbacoa_cli::models::Money;
    /// assert_eq!(Money::from_decimal(19.99).unwrap().cents(), 1999);
    /// assert!(Money::from_decimal(f64::NAN).is_err());
    /// ```
    pub fn from_decimal(value: f64) -> Result<Self, MoneyParseError> {
        if !value.is_finite() {
            return Err(MoneyParseError::NotFinite);
        }

        let cents = (value * 100.0).round();
        if cents.abs() > Self::MAX_AMOUNT.0 as f64 {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }

        Ok(Self(cents as i64))
    }

    /// Whether the amount lies within `±MAX_AMOUNT`
    pub const fn is_within_limit(&self) -> bool {
        self.0.abs() <= Self::MAX_AMOUNT.0
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Get the amount as a decimal value, for wire formats
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Split the amount into `parts` whole-cent shares that add up exactly
    ///
    /// Every share gets `floor(amount / parts)`; the remainder is handed out one
    /// cent at a time to the leading shares. Returns an empty vector for zero
    /// parts.
    ///
    /// # Examples
    /// ```
    /// use barbacoa_cli::models::Money;
    /// let shares = Money::from_cents(100).allocate(3);
    /// assert_eq!(shares, vec![Money::from_cents(34), Money::from_cents(33), Money::from_cents(33)]);
    /// ```
    pub fn allocate(&self, parts: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }

        let parts_i64 = parts as i64;
        let base = self.0.div_euclid(parts_i64);
        let remainder = self.0.rem_euclid(parts_i64) as usize;

        (0..parts)
            .map(|i| Money(if i < remainder { base + 1 } else { base }))
            .collect()
    }

    /// Divide by `divisor`, rounding half away from zero to the cent
    pub fn div_round(&self, divisor: usize) -> Money {
        if divisor == 0 {
            return Money::zero();
        }

        let divisor = divisor as i64;
        let half = divisor / 2;
        let rounded = if self.0 >= 0 {
            (self.0 + half) / divisor
        } else {
            (self.0 - half) / divisor
        };
        Money(rounded)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "10,50", "-10.50", "€10.50", "10.50 €", "10".
    /// Extra decimals round half away from zero, like `from_decimal`.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        // Currency symbol may lead or trail
        let s = s.trim_start_matches(['€', '$']).trim_end_matches(['€', '$']).trim();
        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(original.to_string()));
        }

        // Decimal comma, as typed on Spanish keyboards
        let normalized = if s.contains(',') && !s.contains('.') {
            s.replace(',', ".")
        } else {
            s.to_string()
        };

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let cents = if let Some((units_str, cents_str)) = normalized.split_once('.') {
            if cents_str.contains('.') || !cents_str.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }

            let units: i64 = if units_str.is_empty() {
                0
            } else {
                units_str.parse().map_err(|_| invalid())?
            };

            // Pad to 2 digits, or round on the third
            let cents: i64 = match cents_str.len() {
                0 => 0,
                1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
                _ => {
                    let kept: i64 = cents_str[..2].parse().map_err(|_| invalid())?;
                    if cents_str.as_bytes()[2..].first().is_some_and(|d| *d >= b'5') {
                        kept + 1
                    } else {
                        kept
                    }
                }
            };

            units
                .checked_mul(100)
                .and_then(|u| u.checked_add(cents))
                .ok_or_else(|| MoneyParseError::OutOfRange(original.to_string()))?
        } else {
            normalized
                .parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(|| MoneyParseError::OutOfRange(original.to_string()))?
        };

        let amount = Self(if negative { -cents } else { cents });
        if !amount.is_within_limit() {
            return Err(MoneyParseError::OutOfRange(original.to_string()));
        }
        Ok(amount)
    }

    /// Format with a trailing currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}.{:02} {}",
            sign,
            self.units().abs(),
            self.cents_part(),
            symbol
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("€"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
    NotFinite,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "'{}' is not a valid amount", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
            MoneyParseError::NotFinite => write!(f, "Amount must be a finite number"),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(Money::from_decimal(40.0).unwrap().cents(), 4000);
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_decimal(-2.5).unwrap().cents(), -250);
        assert_eq!(Money::from_decimal(f64::INFINITY), Err(MoneyParseError::NotFinite));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50 €");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00 €");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50 €");
        assert_eq!(format!("{}", Money::from_cents(-5)), "-0.05 €");
        assert_eq!(Money::from_cents(250).format_with_symbol("$"), "2.50 $");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!(std::cmp::min(a, b), b);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("€10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10.50 €").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rounds_extra_decimals() {
        assert_eq!(Money::parse("12.999").unwrap().cents(), 1300);
        assert_eq!(Money::parse("12,994").unwrap().cents(), 1299);
        assert_eq!(Money::parse("0.005").unwrap().cents(), 1);
        assert_eq!(Money::parse("-0.125").unwrap().cents(), -13);
        assert_eq!(Money::parse("9.9951").unwrap().cents(), 1000);

        for raw in ["12.999", "3.14159", "0.005", "7.125"] {
            let value: f64 = raw.parse().unwrap();
            assert_eq!(Money::parse(raw), Money::from_decimal(value), "{raw}");
        }
    }

    #[test]
    fn test_amounts_above_limit_are_rejected() {
        let max = Money::MAX_AMOUNT.to_decimal();
        assert_eq!(Money::from_decimal(max), Ok(Money::MAX_AMOUNT));
        assert!(matches!(
            Money::from_decimal(5e16),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("50000000000000000"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("-10000000000.01"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(Money::parse("10000000000").is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("€").is_err());
        assert!(Money::parse("diez").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("10.-5").is_err());
    }

    #[test]
    fn test_allocate() {
        let shares = Money::from_cents(12000).allocate(3);
        assert_eq!(shares, vec![Money::from_cents(4000); 3]);

        let shares = Money::from_cents(1001).allocate(4);
        assert_eq!(
            shares.iter().map(|m| m.cents()).collect::<Vec<_>>(),
            vec![251, 250, 250, 250]
        );
        assert_eq!(shares.iter().sum::<Money>(), Money::from_cents(1001));

        assert!(Money::from_cents(100).allocate(0).is_empty());
    }

    #[test]
    fn test_div_round() {
        assert_eq!(Money::from_cents(100).div_round(3).cents(), 33);
        assert_eq!(Money::from_cents(200).div_round(3).cents(), 67);
        assert_eq!(Money::from_cents(100).div_round(0), Money::zero());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
