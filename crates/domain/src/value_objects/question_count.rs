//! Requested quiz size
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::QuestionCount;
//!
//! assert_eq!(QuestionCount::clamped(20).value(), 15);
//! assert_eq!(QuestionCount::clamped(1).value(), 3);
//! assert_eq!(QuestionCount::default().value(), 5);
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Number of questions to request, always within `[MIN, MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct QuestionCount(u8);

impl QuestionCount {
    /// Smallest quiz the generator will ask for
    pub const MIN: u8 = 3;
    /// Largest quiz the generator will ask for
    pub const MAX: u8 = 15;
    /// Used when the client sends nothing usable
    pub const DEFAULT: u8 = 5;

    /// Coerce an integer to the nearest bound
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(bounded).unwrap_or(Self::DEFAULT))
    }

    /// Interpret a client-supplied JSON value
    ///
    /// Numbers and numeric strings are truncated toward zero and clamped;
    /// anything else (absent, null, non-numeric, non-finite) yields the default.
    #[must_use]
    pub fn from_json(value: Option<&Value>) -> Self {
        let number = match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match number {
            Some(n) if n.is_finite() => {
                // float-to-int `as` saturates, so huge inputs land on a bound
                #[allow(clippy::cast_possible_truncation)]
                let whole = n.trunc() as i64;
                Self::clamped(whole)
            },
            _ => Self::default(),
        }
    }

    /// Get the count
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Get the count as a `usize` for slicing
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
