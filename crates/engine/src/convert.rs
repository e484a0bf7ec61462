//! Clipboard token to typed cell value.
//!
//! Each declared [`DataType`] has one parser in a [`ParserRegistry`]. The
//! [`Converter`] pairs a registry with the current [`Culture`] and applies the
//! column rules around it: converter pass-through for free-text columns,
//! empty-means-null for optional types, and "nothing to assign" for columns
//! without a field type.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rustc_hash::FxHashMap;
use url::Url;

use gridclip_core::{CellAssignment, CellValue, Column, Culture, DataType};

/// ISO-8601 forms accepted in every culture, after the culture's own patterns.
const ISO_DATETIME_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const ISO_DATE_PATTERNS: &[&str] = &["%Y-%m-%d"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// No conversion exists to the target type.
    InvalidCast { target: DataType },
    /// Text is not in a recognized form for the target type.
    Format { target: DataType, text: String },
    /// Text is well-formed but out of range for the target type.
    Overflow { target: DataType, text: String },
    /// A custom parser rejected its input.
    Argument(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCast { target } => write!(f, "cannot convert text to {target}"),
            Self::Format { target, text } => write!(f, "'{text}' is not a valid {target}"),
            Self::Overflow { target, text } => write!(f, "'{text}' is out of range for {target}"),
            Self::Argument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for ConversionError {}

pub type Parser = Arc<dyn Fn(&str, &Culture) -> Result<CellValue, ConversionError> + Send + Sync>;

/// Parsers keyed by declared type.
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: FxHashMap<DataType, Parser>,
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.parsers.keys().map(|t| t.name()).collect();
        types.sort_unstable();
        f.debug_struct("ParserRegistry").field("types", &types).finish()
    }
}

impl ParserRegistry {
    /// A registry with no parsers; every conversion is an invalid cast.
    pub fn empty() -> Self {
        Self { parsers: FxHashMap::default() }
    }

    /// Parsers for every built-in [`DataType`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(DataType::Bool, |text, _| parse_bool(text));
        registry.register(DataType::Char, |text, _| parse_char(text));
        for int_type in [DataType::Byte, DataType::Int16, DataType::Int32, DataType::Int64] {
            registry.register(int_type, move |text, _| parse_integer(text, int_type));
        }
        registry.register(DataType::Single, |text, culture| parse_float(text, culture, DataType::Single));
        registry.register(DataType::Double, |text, culture| parse_float(text, culture, DataType::Double));
        registry.register(DataType::String, |text, _| Ok(CellValue::Text(text.to_string())));
        registry.register(DataType::DateTime, parse_datetime);
        registry.register(DataType::Uri, |text, _| parse_uri(text));
        registry
    }

    /// Install or replace the parser for `data_type`.
    pub fn register<F>(&mut self, data_type: DataType, parser: F)
    where
        F: Fn(&str, &Culture) -> Result<CellValue, ConversionError> + Send + Sync + 'static,
    {
        self.parsers.insert(data_type, Arc::new(parser));
    }

    pub fn parse(
        &self,
        data_type: DataType,
        text: &str,
        culture: &Culture,
    ) -> Result<CellValue, ConversionError> {
        match self.parsers.get(&data_type) {
            Some(parser) => parser(text, culture),
            None => Err(ConversionError::InvalidCast { target: data_type }),
        }
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Converts clipboard tokens for a column under one culture.
#[derive(Debug, Clone)]
pub struct Converter {
    culture: Culture,
    parsers: ParserRegistry,
}

impl Converter {
    pub fn new(culture: Culture) -> Self {
        Self::with_registry(culture, ParserRegistry::with_defaults())
    }

    pub fn with_registry(culture: Culture, parsers: ParserRegistry) -> Self {
        Self { culture, parsers }
    }

    pub fn parsers_mut(&mut self) -> &mut ParserRegistry {
        &mut self.parsers
    }

    /// Convert `raw` for `column`.
    ///
    /// `Ok(None)` means the token was accepted but there is nothing to assign
    /// (the column declares no data type).
    pub fn convert_token(
        &self,
        raw: &str,
        column: &Column,
    ) -> Result<Option<CellAssignment>, ConversionError> {
        if column.converter.is_some() && column.kind.is_free_text() {
            return Ok(Some(CellAssignment::Raw(raw.to_string())));
        }

        let Some(column_type) = column.data_type else {
            return Ok(None);
        };

        if column_type.is_optional() && raw.is_empty() {
            return Ok(Some(CellAssignment::Value(CellValue::Null)));
        }

        let value = self.parsers.parse(column_type.data_type(), raw, &self.culture)?;
        Ok(Some(CellAssignment::Value(value)))
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Culture::default())
    }
}

fn trim(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\0')
}

fn parse_bool(text: &str) -> Result<CellValue, ConversionError> {
    let t = trim(text);
    if t.eq_ignore_ascii_case("true") {
        Ok(CellValue::Bool(true))
    } else if t.eq_ignore_ascii_case("false") {
        Ok(CellValue::Bool(false))
    } else {
        Err(ConversionError::Format { target: DataType::Bool, text: text.to_string() })
    }
}

fn parse_char(text: &str) -> Result<CellValue, ConversionError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(CellValue::Char(c)),
        _ => Err(ConversionError::Format { target: DataType::Char, text: text.to_string() }),
    }
}

/// Optional sign followed by ASCII digits, surrounding whitespace allowed.
fn parse_integer(text: &str, target: DataType) -> Result<CellValue, ConversionError> {
    let format_err = || ConversionError::Format { target, text: text.to_string() };
    let overflow_err = || ConversionError::Overflow { target, text: text.to_string() };

    let t = trim(text);
    let (negative, digits) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_err());
    }

    let mut magnitude: i128 = 0;
    for b in digits.bytes() {
        magnitude = magnitude
            .checked_mul(10)
            .and_then(|m| m.checked_add(i128::from(b - b'0')))
            .ok_or_else(overflow_err)?;
    }
    let value = if negative { -magnitude } else { magnitude };

    let (min, max) = target.int_range().unwrap_or((i64::MIN, i64::MAX));
    if value < i128::from(min) || value > i128::from(max) {
        return Err(overflow_err());
    }
    Ok(CellValue::Int(value as i64))
}

/// Culture-aware float: group separators in the integer part, the culture's
/// decimal separator, optional exponent.
fn parse_float(text: &str, culture: &Culture, target: DataType) -> Result<CellValue, ConversionError> {
    let format_err = || ConversionError::Format { target, text: text.to_string() };

    let t = trim(text);
    let mut normalized = String::with_capacity(t.len());
    let mut chars = t.chars().peekable();

    if let Some(&c) = chars.peek() {
        if c == '-' || c == '+' {
            normalized.push(c);
            chars.next();
        }
    }

    let mut seen_digit = false;
    let mut seen_decimal = false;
    let mut seen_exponent = false;
    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            normalized.push(c);
            seen_digit = true;
        } else if c == culture.decimal_separator && !seen_decimal && !seen_exponent {
            normalized.push('.');
            seen_decimal = true;
        } else if is_group_separator(c, culture) && seen_digit && !seen_decimal && !seen_exponent {
            continue;
        } else if (c == 'e' || c == 'E') && seen_digit && !seen_exponent {
            normalized.push('e');
            seen_exponent = true;
            if let Some(&sign) = chars.peek() {
                if sign == '-' || sign == '+' {
                    normalized.push(sign);
                    chars.next();
                }
            }
        } else {
            return Err(format_err());
        }
    }

    if !seen_digit {
        return Err(format_err());
    }
    let value: f64 = normalized.parse().map_err(|_| format_err())?;

    let value = if target == DataType::Single { value as f32 as f64 } else { value };
    if !value.is_finite() {
        return Err(ConversionError::Overflow { target, text: text.to_string() });
    }
    Ok(CellValue::Float(value))
}

fn is_group_separator(c: char, culture: &Culture) -> bool {
    // Cultures grouping with a no-break space also accept a plain space.
    c == culture.group_separator || (culture.group_separator == '\u{a0}' && c == ' ')
}

fn parse_datetime(text: &str, culture: &Culture) -> Result<CellValue, ConversionError> {
    let t = trim(text);
    let datetime_patterns = culture.datetime_patterns.iter().chain(ISO_DATETIME_PATTERNS);
    for pattern in datetime_patterns {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, pattern) {
            return Ok(CellValue::DateTime(dt));
        }
    }
    let date_patterns = culture.date_patterns.iter().chain(ISO_DATE_PATTERNS);
    for pattern in date_patterns {
        if let Ok(date) = NaiveDate::parse_from_str(t, pattern) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(CellValue::DateTime(dt));
            }
        }
    }
    Err(ConversionError::Format { target: DataType::DateTime, text: text.to_string() })
}

fn parse_uri(text: &str) -> Result<CellValue, ConversionError> {
    Url::parse(trim(text))
        .map(CellValue::Uri)
        .map_err(|_| ConversionError::Format { target: DataType::Uri, text: text.to_string() })
}
