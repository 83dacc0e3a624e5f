// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Elapsed time carried as text, e.g. `"1h30m0s"`.
//!
//! The text form is what gets stored and sent over the wire, so it is kept
//! exactly as given. The grammar is one or more `<integer><unit>` pairs with
//! `unit` in `h`, `m`, `s`.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Validated duration text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Duration(String);

impl Duration {
    /// Parse duration text, rejecting anything outside the grammar.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        parse_seconds(text).ok_or_else(|| ValidationError::InvalidDuration {
            input: text.to_string(),
        })?;
        Ok(Self(text.to_string()))
    }

    /// Canonical text for a whole number of seconds (`0s`, `5s`, `2m0s`, `1h30m0s`).
    pub fn from_seconds(total: u64) -> Self {
        let hours = total / SECONDS_PER_HOUR;
        let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = total % SECONDS_PER_MINUTE;

        let text = if hours > 0 {
            format!("{}h{}m{}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m{}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        };
        Self(text)
    }

    /// Total elapsed seconds.
    ///
    /// Text that does not parse yields 0 instead of an error; callers only
    /// ever see validated values, so this matches the legacy behaviour of
    /// never failing on format here.
    pub fn to_seconds(&self) -> f64 {
        parse_seconds(&self.0).unwrap_or(0) as f64
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::from_seconds(0)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Duration {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Duration {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Duration> for String {
    fn from(value: Duration) -> Self {
        value.0
    }
}

/// Sum of all `<integer><unit>` pairs, or `None` if the text is malformed.
fn parse_seconds(text: &str) -> Option<u64> {
    if text.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    let mut digits = String::new();

    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let scale = match c {
            'h' => SECONDS_PER_HOUR,
            'm' => SECONDS_PER_MINUTE,
            's' => 1,
            _ => return None,
        };
        if digits.is_empty() {
            return None;
        }
        let value: u64 = digits.parse().ok()?;
        total = total.checked_add(value.checked_mul(scale)?)?;
        digits.clear();
    }

    // Trailing digits without a unit
    if !digits.is_empty() {
        return None;
    }

    Some(total)
}
