//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that sums over many
//! transactions are exact. Spreadsheet values arrive as floats or decimal
//! strings and are rounded to the nearest cent on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use spending_report::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from a floating point value in currency units
    ///
    /// Rounds to the nearest cent, which absorbs the binary representation
    /// noise spreadsheets store for values like `-12.3`. Returns `None` for
    /// NaN, infinities and values outside the range of cents.
    pub fn from_units(units: f64) -> Option<Self> {
        let cents = (units * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if cents.is_finite() && cents.abs() < i64::MAX as f64 {
            Some(Self(cents as i64))
        } else {
            None
        }
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount in currency units (for charting)
    pub fn as_units(&self) -> f64 {
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

    /// Arithmetic mean of `count` amounts summing to `total`, rounded to the cent
    pub fn mean(total: Money, count: usize) -> Self {
        if count == 0 {
            return Self::zero();
        }
        Self((total.0 as f64 / count as f64).round() as i64)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "10.50", "-10,50", "1.234,56", "1,234.56", "€ 12" and "12 EUR".
    /// When both separators appear, the one that comes last is the decimal
    /// separator. A single kind of separator groups thousands when every
    /// group after it has exactly three digits and the leading group is one
    /// to three digits without a leading zero ("1.234", "1,234,567");
    /// otherwise it is the decimal separator ("12,5", "0.005").
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let cleaned: String = s
            .trim()
            .trim_end_matches("EUR")
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '€' && *c != '$')
            .collect();

        let (negative, digits) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
        };

        if digits.is_empty() {
            return Err(invalid());
        }

        let decimal_sep = match (digits.rfind(','), digits.rfind('.')) {
            (Some(comma), Some(dot)) => Some(if comma > dot { ',' } else { '.' }),
            (Some(_), None) => lone_separator(digits, ',').ok_or_else(invalid)?,
            (None, Some(_)) => lone_separator(digits, '.').ok_or_else(invalid)?,
            (None, None) => None,
        };

        let (whole, fraction) = match decimal_sep {
            Some(sep) => {
                let idx = digits.rfind(sep).ok_or_else(invalid)?;
                (&digits[..idx], &digits[idx + 1..])
            }
            None => (digits, ""),
        };

        let whole: String = whole.chars().filter(|c| *c != '.' && *c != ',').collect();
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        // Pad or round the fraction to two digits
        let cents_part: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            2 => fraction.parse().map_err(|_| invalid())?,
            _ => {
                let head: i64 = fraction[..2].parse().map_err(|_| invalid())?;
                let round_up = fraction.as_bytes()[2] >= b'5';
                head + i64::from(round_up)
            }
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents_part))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol appended, e.g. "12.50 €"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if symbol.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", self, symbol)
        }
    }
}

/// Role of `sep` when it is the only separator kind in `digits`
///
/// `Some(Some(sep))` for a decimal separator, `Some(None)` for thousands
/// grouping and `None` when repeated separators do not form valid groups.
fn lone_separator(digits: &str, sep: char) -> Option<Option<char>> {
    let groups: Vec<&str> = digits.split(sep).collect();
    let lead = groups[0];
    let grouped = (1..=3).contains(&lead.len())
        && !lead.starts_with('0')
        && groups[1..].iter().all(|g| g.len() == 3);

    match (grouped, groups.len()) {
        (true, _) => Some(None),
        (false, 2) => Some(Some(sep)),
        (false, _) => None,
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
