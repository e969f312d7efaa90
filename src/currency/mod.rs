//! Exact monetary values and the text codec used at the UI boundary.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// Number of fractional digits every [`Amount`] carries.
pub const MINOR_UNITS: u32 = 2;

/// Largest magnitude an [`Amount`] may hold, in cents.
pub const MAX_CENTS: i128 = i64::MAX as i128;

/// Signed fixed-point money value, always held at cent scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, MINOR_UNITS))
    }

    /// Wraps a decimal that is already exact at cent precision.
    pub fn from_decimal(value: Decimal) -> Result<Self> {
        if value.normalize().scale() > MINOR_UNITS {
            return Err(LedgerError::parse(
                &value.to_string(),
                "more than two fractional digits",
            ));
        }
        let amount = Self::at_scale(value);
        if !amount.in_range() {
            return Err(LedgerError::parse(&value.to_string(), "amount out of range"));
        }
        Ok(amount)
    }

    /// Sum of two amounts, or `None` when it leaves the representable range.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        let amount = Self::at_scale(self.0.checked_add(rhs.0)?);
        amount.in_range().then_some(amount)
    }

    fn in_range(&self) -> bool {
        self.0.scale() == MINOR_UNITS && self.0.mantissa().abs() <= MAX_CENTS
    }

    /// Rounds half-to-even onto the cent grid.
    pub(crate) fn rounded(value: Decimal) -> Self {
        Self::at_scale(value.round_dp(MINOR_UNITS))
    }

    fn at_scale(mut value: Decimal) -> Self {
        value.rescale(MINOR_UNITS);
        Self(value)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn cents(&self) -> i128 {
        let mut value = self.0;
        value.rescale(MINOR_UNITS);
        value.mantissa()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        !self.0.is_zero() && self.0.is_sign_positive()
    }

    pub fn is_negative(&self) -> bool {
        !self.0.is_zero() && self.0.is_sign_negative()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        value.rescale(MINOR_UNITS);
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        write!(f, "{}", value)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::from_decimal(value)
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

// Plain operators saturate at the `Decimal` bounds instead of panicking; use
// `checked_add` where an overflow must be reported.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, |acc, amount| acc + amount)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

/// Parses user-entered amounts and renders them for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountCodec {
    symbol: String,
    grouping_separator: char,
}

impl Default for AmountCodec {
    fn default() -> Self {
        Self::new("$", ',')
    }
}

impl AmountCodec {
    pub fn new(symbol: impl Into<String>, grouping_separator: char) -> Self {
        Self {
            symbol: symbol.into(),
            grouping_separator,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn grouping_separator(&self) -> char {
        self.grouping_separator
    }

    /// Parses free text such as `$1,250.00`, `-35.5` or `120-` into an exact amount.
    pub fn parse(&self, text: &str) -> Result<Amount> {
        let mut clean = text.trim().to_string();
        if !self.symbol.is_empty() {
            clean = clean.replace(self.symbol.as_str(), "");
        }
        clean = clean.replace(self.grouping_separator, "");
        let mut clean = clean.trim().to_string();
        if clean.is_empty() {
            return Err(LedgerError::parse(text, "no digits found"));
        }

        if let Some(body) = clean.strip_suffix('-') {
            if body.starts_with(['+', '-']) {
                return Err(LedgerError::parse(text, "conflicting sign markers"));
            }
            clean = format!("-{}", body.trim_end());
        }

        let (negative, unsigned) = match clean.as_bytes()[0] {
            b'-' => (true, &clean[1..]),
            b'+' => (false, &clean[1..]),
            _ => (false, clean.as_str()),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() && fraction.is_empty() {
            return Err(LedgerError::parse(text, "no digits found"));
        }
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(LedgerError::parse(text, "not a decimal numeral"));
        }
        if fraction.trim_end_matches('0').len() > MINOR_UNITS as usize {
            return Err(LedgerError::parse(text, "more than two fractional digits"));
        }

        let whole = if whole.is_empty() { "0" } else { whole };
        let fraction = fraction.trim_end_matches('0');
        let numeral = match (negative, fraction.is_empty()) {
            (false, true) => whole.to_string(),
            (false, false) => format!("{whole}.{fraction}"),
            (true, true) => format!("-{whole}"),
            (true, false) => format!("-{whole}.{fraction}"),
        };
        let value = Decimal::from_str(&numeral)
            .map_err(|err| LedgerError::parse(text, err.to_string()))?;
        Amount::from_decimal(value)
    }

    /// Renders `<sign><symbol><grouped>.<cents>` with an explicit sign.
    pub fn format(&self, amount: Amount) -> String {
        let sign = if amount.is_negative() { '-' } else { '+' };
        format!("{}{}{}", sign, self.symbol, self.grouped_magnitude(amount))
    }

    /// Renders balances and statistics, showing a sign only when negative.
    pub fn format_balance(&self, amount: Amount) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.symbol, self.grouped_magnitude(amount))
    }

    fn grouped_magnitude(&self, amount: Amount) -> String {
        let body = amount.abs().to_string();
        let (whole, fraction) = body.split_once('.').unwrap_or((body.as_str(), "00"));
        format!(
            "{}.{}",
            group_digits(whole, self.grouping_separator),
            fraction
        )
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
