//! Cell values.
//!
//! A `Value` is one of a closed set of kinds. Equality is exact and typed:
//! an integer never equals a decimal even when they denote the same number.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;

/// A color made of three 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r={} g={} b={}", self.r, self.g, self.b)
    }
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for Color {
    type Error = DecodeError;

    fn try_from(map: serde_json::Map<String, serde_json::Value>) -> Result<Self, Self::Error> {
        if let Some(key) = map.keys().find(|k| !matches!(k.as_str(), "r" | "g" | "b")) {
            return Err(DecodeError::InvalidColor(format!("unexpected field '{}'", key)));
        }

        let channel = |name: &str| -> Result<u8, DecodeError> {
            let raw = map
                .get(name)
                .ok_or_else(|| DecodeError::InvalidColor(format!("missing field '{}'", name)))?;
            raw.as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .ok_or_else(|| {
                    DecodeError::InvalidColor(format!("'{}' must be an integer in 0..=255, got {}", name, raw))
                })
        };

        Ok(Color::new(channel("r")?, channel("g")?, channel("b")?))
    }
}

/// Exact base-10 number of unbounded precision: `digits * 10^exponent`.
///
/// Always kept normalized (no leading or trailing zero digits, zero has no
/// sign), so structural equality is numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    negative: bool,
    // Empty for zero
    digits: String,
    exponent: i64,
}

// Longest run of zeros written out in plain notation before falling back to
// an exponent.
const PLAIN_ZEROS: i64 = 20;

impl Decimal {
    fn zero() -> Self {
        Self {
            negative: false,
            digits: String::new(),
            exponent: 0,
        }
    }

    /// Builds a normalized decimal from ASCII digits. Returns `None` when the
    /// exponent no longer fits after trailing zeros are folded into it.
    fn normalized(negative: bool, digits: &str, exponent: i64) -> Option<Self> {
        let significant = digits.trim_start_matches('0');
        let trimmed = significant.trim_end_matches('0');
        if trimmed.is_empty() {
            return Some(Self::zero());
        }

        let stripped = i64::try_from(significant.len() - trimmed.len()).ok()?;
        Some(Self {
            negative,
            digits: trimmed.to_string(),
            exponent: exponent.checked_add(stripped)?,
        })
    }
}

impl FromStr for Decimal {
    type Err = DecodeError;

    /// Parses `[-+]digits[.digits][(e|E)[-+]digits]` without any rounding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DecodeError::InvalidDecimal(s.to_string());

        let (number, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => {
                let exp: i64 = s[pos + 1..].parse().map_err(|_| invalid())?;
                (&s[..pos], exp)
            }
            None => (s, 0),
        };

        let (negative, unsigned) = match number.as_bytes().first() {
            Some(b'-') => (true, &number[1..]),
            Some(b'+') => (false, &number[1..]),
            _ => (false, number),
        };

        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let digits = format!("{}{}", int_part, frac_part);
        let frac_len = i64::try_from(frac_part.len()).map_err(|_| invalid())?;
        let exponent = exponent.checked_sub(frac_len).ok_or_else(invalid)?;

        Decimal::normalized(negative, &digits, exponent).ok_or_else(invalid)
    }
}

/// Always written with a fraction or an exponent, so the text reads back as
/// a decimal and never as an integer.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.digits.is_empty() {
            return f.write_str("0.0");
        }

        let sign = if self.negative { "-" } else { "" };
        let len = self.digits.len() as i64;

        if (0..=PLAIN_ZEROS).contains(&self.exponent) {
            let zeros = "0".repeat(self.exponent as usize);
            write!(f, "{}{}{}.0", sign, self.digits, zeros)
        } else if self.exponent < 0 && self.exponent >= -(len + PLAIN_ZEROS) {
            let scale = self.exponent.unsigned_abs() as usize;
            let padded = format!("{:0>width$}", self.digits, width = scale + 1);
            let (int_part, frac_part) = padded.split_at(padded.len() - scale);
            write!(f, "{}{}.{}", sign, int_part, frac_part)
        } else {
            write!(f, "{}{}e{}", sign, self.digits, self.exponent)
        }
    }
}

/// Runtime kind of a value, used in mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Real,
    Char,
    String,
    Color,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "Integer",
            ValueKind::Real => "Real",
            ValueKind::Char => "Char",
            ValueKind::String => "String",
            ValueKind::Color => "Color",
        };
        f.write_str(name)
    }
}

/// A value stored in a table cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Integer(i128),
    Real(Decimal),
    Char(char),
    String(String),
    Color(Color),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
            Value::Char(_) => ValueKind::Char,
            Value::String(_) => ValueKind::String,
            Value::Color(_) => ValueKind::Color,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(d) => write!(f, "{}", d),
            Value::Char(c) => write!(f, "{}", c),
            Value::String(s) => f.write_str(s),
            Value::Color(c) => write!(f, "{}", c),
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = DecodeError;

    fn try_from(raw: serde_json::Value) -> Result<Self, Self::Error> {
        match raw {
            serde_json::Value::Number(n) => {
                // Number keeps its literal text, so no precision is lost here.
                let text = n.to_string();
                if text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
                    Ok(Value::Real(text.parse()?))
                } else {
                    text.parse()
                        .map(Value::Integer)
                        .map_err(|_| DecodeError::IntegerOutOfRange(text))
                }
            }
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Object(map) => Ok(Value::Color(Color::try_from(map)?)),
            serde_json::Value::Bool(_) => Err(DecodeError::Unsupported("boolean")),
            serde_json::Value::Null => Err(DecodeError::Unsupported("null")),
            serde_json::Value::Array(_) => Err(DecodeError::Unsupported("array")),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(i) => serializer.serialize_i128(*i),
            Value::Real(d) => serde_json::Number::from_str(&d.to_string())
                .map_err(S::Error::custom)?
                .serialize(serializer),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::String(s) => serializer.serialize_str(s),
            Value::Color(c) => c.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Value::try_from(raw).map_err(D::Error::custom)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v as i128)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i128)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Real(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Value::Color(v)
    }
}
