//! Fixed-point decimal type for contract metadata.
//!
//! Contract multipliers and tick sizes arrive as decimal strings
//! (`"1000.0"`, `"0.001"`). They are stored as `i64` at 1e-6 scale so that
//! equality and ordering of contract records never depend on floating-point
//! rounding.
//!
//! 1.0 = `Micros(1_000_000)`. Parsing never rounds: a value with more than six
//! decimal places is rejected.

use std::fmt;

const SCALE: i64 = 1_000_000;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced when converting a decimal string to [`Micros`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecimalError {
    /// The input was empty or whitespace.
    Empty,
    /// The input is not a plain decimal number.
    Invalid(String),
    /// More than 6 decimal places (conversion would need rounding).
    TooManyDecimalPlaces(String),
    /// The value does not fit in `i64` micros.
    Overflow(String),
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalError::Empty => write!(f, "decimal value is empty"),
            DecimalError::Invalid(raw) => write!(f, "not a decimal number: '{raw}'"),
            DecimalError::TooManyDecimalPlaces(raw) => {
                write!(f, "more than 6 decimal places: '{raw}'")
            }
            DecimalError::Overflow(raw) => write!(f, "decimal out of range: '{raw}'"),
        }
    }
}

impl std::error::Error for DecimalError {}

// ---------------------------------------------------------------------------
// Micros newtype
// ---------------------------------------------------------------------------

/// A fixed-point decimal at 1e-6 scale.
///
/// There is no `From<i64>`: use [`Micros::new`] when a raw integer is known
/// to already be at micro scale, or [`Micros::parse`] for decimal text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Micros(i64);

impl Micros {
    pub const ZERO: Micros = Micros(0);

    #[inline]
    pub const fn new(raw: i64) -> Self {
        Micros(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Convert a decimal string to micros deterministically.
    ///
    /// Rules:
    /// - Optional leading `+` or `-`.
    /// - Optional fractional part separated by a single `.`.
    /// - At most 6 decimal places.
    /// - No floating point at any stage.
    pub fn parse(s: &str) -> Result<Micros, DecimalError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DecimalError::Empty);
        }
        let invalid = || DecimalError::Invalid(s.to_string());

        let (negative, digits) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (false, rest)
        } else {
            (false, s)
        };

        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }
        if frac_part.len() > 6 {
            return Err(DecimalError::TooManyDecimalPlaces(s.to_string()));
        }

        let int_val: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse::<i64>()
                .map_err(|_| DecimalError::Overflow(s.to_string()))?
        };

        // Right-pad the fraction to exactly 6 digits.
        let frac_val: i64 = format!("{frac_part:0<6}").parse().map_err(|_| invalid())?;

        let micros = int_val
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac_val))
            .ok_or_else(|| DecimalError::Overflow(s.to_string()))?;

        Ok(Micros(if negative { -micros } else { micros }))
    }
}

/// Renders the shortest exact decimal form: `1000`, `0.001`, `-2.5`.
impl fmt::Display for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let int = abs / SCALE as u64;
        let frac = abs % SCALE as u64;
        if frac == 0 {
            return write!(f, "{sign}{int}");
        }
        let frac = format!("{frac:06}");
        write!(f, "{sign}{int}.{}", frac.trim_end_matches('0'))
    }
}

impl std::str::FromStr for Micros {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Micros::parse(s)
    }
}
