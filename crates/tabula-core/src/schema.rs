//! Column types and column definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, TypeMismatch};
use crate::value::{Color, Value};

/// The type tag of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Integer,
    Real,
    Char,
    String,
    Color,
    /// A color whose channels are each constrained to an inclusive range.
    ColorInvl,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Integer => "Integer",
            Type::Real => "Real",
            Type::Char => "Char",
            Type::String => "String",
            Type::Color => "Color",
            Type::ColorInvl => "ColorInvl",
        };
        f.write_str(name)
    }
}

/// One of the three color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    R,
    G,
    B,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::R => "r",
            Channel::G => "g",
            Channel::B => "b",
        };
        f.write_str(name)
    }
}

/// Inclusive bounds for a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

impl ChannelRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: u8) -> bool {
        self.min <= v && v <= self.max
    }
}

/// Per-channel bounds of a `ColorInvl` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRange {
    pub r: ChannelRange,
    pub g: ChannelRange,
    pub b: ChannelRange,
}

impl ColorRange {
    pub fn new(r: (u8, u8), g: (u8, u8), b: (u8, u8)) -> Self {
        Self {
            r: ChannelRange::new(r.0, r.1),
            g: ChannelRange::new(g.0, g.1),
            b: ChannelRange::new(b.0, b.1),
        }
    }

    pub fn channels(&self) -> [(Channel, ChannelRange); 3] {
        [(Channel::R, self.r), (Channel::G, self.g), (Channel::B, self.b)]
    }

    pub fn contains(&self, color: &Color) -> bool {
        self.r.contains(color.r) && self.g.contains(color.g) && self.b.contains(color.b)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        match self.channels().into_iter().find(|(_, range)| range.min > range.max) {
            Some((channel, _)) => Err(SchemaError::RangeOutOfOrder { channel }),
            None => Ok(()),
        }
    }
}

/// A named, typed schema slot.
///
/// The only ways to obtain a `Column` are `Column::new` and decoding a
/// `ColumnSpec`, both of which enforce that a range is present exactly
/// when the type is `ColorInvl` and that every channel has `min <= max`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColumnSpec", into = "ColumnSpec")]
pub struct Column {
    name: String,
    column_type: Type,
    range: Option<ColorRange>,
}

impl Column {
    pub fn new(
        name: impl Into<String>,
        column_type: Type,
        range: Option<ColorRange>,
    ) -> Result<Self, SchemaError> {
        match (column_type, range) {
            (Type::ColorInvl, None) => return Err(SchemaError::MissingRange),
            (Type::ColorInvl, Some(range)) => range.validate()?,
            (_, Some(_)) => return Err(SchemaError::UnexpectedRange { column_type }),
            (_, None) => {}
        }

        Ok(Self {
            name: name.into(),
            column_type,
            range,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> Type {
        self.column_type
    }

    pub fn range(&self) -> Option<&ColorRange> {
        self.range.as_ref()
    }

    /// The column's type identity with the name stripped.
    ///
    /// Two columns hold the same type iff their signatures are equal.
    pub fn type_signature(&self) -> Column {
        self.renamed("")
    }

    /// Same type and range under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Column {
        Column {
            name: name.into(),
            column_type: self.column_type,
            range: self.range,
        }
    }

    /// Human-readable type, e.g. `ColorInvl (R∈[0..10], G∈[0..255], B∈[5..5])`.
    pub fn type_description(&self) -> String {
        match &self.range {
            Some(range) => format!(
                "{} (R∈[{}..{}], G∈[{}..{}], B∈[{}..{}])",
                self.column_type,
                range.r.min,
                range.r.max,
                range.g.min,
                range.g.max,
                range.b.min,
                range.b.max
            ),
            None => self.column_type.to_string(),
        }
    }

    pub fn check_value(&self, value: &Value) -> Result<(), TypeMismatch> {
        let accepted = match (self.column_type, value) {
            (Type::Integer, Value::Integer(_)) => true,
            (Type::Real, Value::Integer(_) | Value::Real(_)) => true,
            (Type::Char, Value::Char(_)) => true,
            (Type::Char, Value::String(s)) => s.chars().count() == 1,
            (Type::String, Value::String(_) | Value::Char(_)) => true,
            (Type::Color, Value::Color(_)) => true,
            (Type::ColorInvl, Value::Color(color)) => {
                self.range.is_some_and(|range| range.contains(color))
            }
            _ => false,
        };

        if accepted {
            Ok(())
        } else {
            Err(TypeMismatch {
                expected: self.type_description(),
                kind: value.kind(),
                value: value.to_string(),
            })
        }
    }

    /// Checks `value` and returns it in the representation this column stores.
    ///
    /// Text is canonicalized so cells under equal column types compare
    /// equal: `Char` columns hold `Value::Char`, `String` columns hold
    /// `Value::String`.
    pub fn admit(&self, value: Value) -> Result<Value, TypeMismatch> {
        self.check_value(&value)?;

        let value = match (self.column_type, value) {
            (Type::Char, Value::String(s)) => match s.chars().next() {
                Some(c) => Value::Char(c),
                None => Value::String(s),
            },
            (Type::String, Value::Char(c)) => Value::String(c.to_string()),
            (_, value) => value,
        };
        Ok(value)
    }
}

/// Flat wire form of a column, with each bound optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: Type,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_min: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_max: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g_min: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g_max: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_min: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_max: Option<u8>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, column_type: Type) -> Self {
        Self {
            name: name.into(),
            column_type,
            r_min: None,
            r_max: None,
            g_min: None,
            g_max: None,
            b_min: None,
            b_max: None,
        }
    }

    fn bounds(&self) -> [Option<u8>; 6] {
        [self.r_min, self.r_max, self.g_min, self.g_max, self.b_min, self.b_max]
    }
}

impl TryFrom<ColumnSpec> for Column {
    type Error = SchemaError;

    fn try_from(spec: ColumnSpec) -> Result<Self, Self::Error> {
        let range = match spec.bounds() {
            [Some(r_min), Some(r_max), Some(g_min), Some(g_max), Some(b_min), Some(b_max)] => {
                Some(ColorRange::new((r_min, r_max), (g_min, g_max), (b_min, b_max)))
            }
            bounds if bounds.iter().all(Option::is_none) => None,
            _ if spec.column_type == Type::ColorInvl => return Err(SchemaError::MissingRange),
            _ => {
                return Err(SchemaError::UnexpectedRange {
                    column_type: spec.column_type,
                })
            }
        };

        Column::new(spec.name, spec.column_type, range)
    }
}

impl From<Column> for ColumnSpec {
    fn from(column: Column) -> Self {
        let mut spec = ColumnSpec::new(column.name, column.column_type);
        if let Some(range) = column.range {
            spec.r_min = Some(range.r.min);
            spec.r_max = Some(range.r.max);
            spec.g_min = Some(range.g.min);
            spec.g_max = Some(range.g.max);
            spec.b_min = Some(range.b.min);
            spec.b_max = Some(range.b.max);
        }
        spec
    }
}
