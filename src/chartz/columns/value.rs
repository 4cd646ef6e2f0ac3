//! Typed cell values, coercion, and formatting.
//!
//! This module is the boundary between raw edit text and the typed values a
//! chart document stores. Coercion runs every range and shape check for a
//! column's kind; formatting is its inverse and produces the text an edit
//! field is populated with.

use super::spec::{ColumnKind, ColumnSpec};
use crate::error::ValidationError;
use serde_json::{Number, Value};

/// A typed value accepted for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Rgb([f64; 3]),
}

impl FieldValue {
    /// The JSON representation written into a chart document.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Integer(n) => Value::Number((*n).into()),
            FieldValue::Float(v) => float_to_json(*v),
            FieldValue::Rgb(components) => {
                Value::Array(components.iter().map(|c| float_to_json(*c)).collect())
            }
        }
    }
}

fn float_to_json(v: f64) -> Value {
    match Number::from_f64(v) {
        Some(n) => Value::Number(n),
        // Unreachable: coercion rejects non-finite numbers.
        None => Value::Null,
    }
}

/// What staging a cell records: a typed value to write, or an instruction
/// to remove the field from the document entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Set(FieldValue),
    Clear,
}

impl CellValue {
    /// The text this cell presents once staged. A cleared field presents
    /// as empty.
    pub fn text(&self) -> String {
        match self {
            CellValue::Set(value) => format_value(value),
            CellValue::Clear => String::new(),
        }
    }
}

/// Coerce raw edit text into a typed cell value for a column.
///
/// Empty text is an error on mandatory columns, an empty string on the
/// multiline free-text column, and a `Clear` on optional columns.
pub fn coerce(spec: &ColumnSpec, raw: &str) -> Result<CellValue, ValidationError> {
    match spec.kind {
        ColumnKind::Text => coerce_text(spec, raw),
        ColumnKind::Integer => {
            if raw.trim().is_empty() {
                return Err(ValidationError::Empty {
                    column: spec.key.to_string(),
                });
            }
            Ok(CellValue::Set(FieldValue::Integer(parse_non_negative_int(
                spec, raw,
            )?)))
        }
        ColumnKind::OptionalInteger => {
            if raw.trim().is_empty() {
                return Ok(CellValue::Clear);
            }
            Ok(CellValue::Set(FieldValue::Integer(parse_non_negative_int(
                spec, raw,
            )?)))
        }
        ColumnKind::Float => {
            if raw.trim().is_empty() {
                return Err(ValidationError::Empty {
                    column: spec.key.to_string(),
                });
            }
            let value = parse_number(raw)?;
            if value < 0.0 {
                return Err(ValidationError::Negative {
                    column: spec.key.to_string(),
                    raw: raw.trim().to_string(),
                });
            }
            Ok(CellValue::Set(FieldValue::Float(value)))
        }
        ColumnKind::Range(min, max) => {
            if raw.trim().is_empty() {
                return Err(ValidationError::Empty {
                    column: spec.key.to_string(),
                });
            }
            let value = parse_int(raw)?;
            if value < min || value > max {
                return Err(ValidationError::OutOfRange {
                    column: spec.key.to_string(),
                    min,
                    max,
                    raw: raw.trim().to_string(),
                });
            }
            Ok(CellValue::Set(FieldValue::Integer(value)))
        }
        ColumnKind::Rgb => coerce_rgb(raw),
    }
}

fn coerce_text(spec: &ColumnSpec, raw: &str) -> Result<CellValue, ValidationError> {
    if !spec.multiline && (raw.contains('\n') || raw.contains('\r')) {
        return Err(ValidationError::Multiline {
            column: spec.key.to_string(),
        });
    }
    if raw.is_empty() && !spec.multiline {
        return Err(ValidationError::Empty {
            column: spec.key.to_string(),
        });
    }
    Ok(CellValue::Set(FieldValue::Text(raw.to_string())))
}

fn coerce_rgb(raw: &str) -> Result<CellValue, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(CellValue::Clear);
    }
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(ValidationError::ComponentCount {
            count: tokens.len(),
        });
    }
    let mut components = [0.0; 3];
    for (slot, token) in components.iter_mut().zip(tokens.iter().copied()) {
        let value = parse_number(token)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::ComponentRange {
                raw: token.to_string(),
            });
        }
        *slot = value;
    }
    Ok(CellValue::Set(FieldValue::Rgb(components)))
}

fn parse_int(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAWholeNumber {
            raw: raw.trim().to_string(),
        })
}

fn parse_non_negative_int(spec: &ColumnSpec, raw: &str) -> Result<i64, ValidationError> {
    let value = parse_int(raw)?;
    if value < 0 {
        return Err(ValidationError::Negative {
            column: spec.key.to_string(),
            raw: raw.trim().to_string(),
        });
    }
    Ok(value)
}

fn parse_number(raw: &str) -> Result<f64, ValidationError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            raw: raw.trim().to_string(),
        })?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            raw: raw.trim().to_string(),
        });
    }
    Ok(value)
}

/// Format a typed value back to edit text. Inverse of [`coerce`].
pub fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::Float(v) => v.to_string(),
        FieldValue::Rgb([r, g, b]) => format!("{} {} {}", r, g, b),
    }
}

/// The text a stored (on-disk) JSON value presents in the table.
///
/// Missing fields present as empty. Arrays of numbers present in the same
/// space-separated syntax the color columns are edited in.
pub fn stored_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) if items.iter().all(|item| item.is_number()) => items
            .iter()
            .filter_map(|item| item.as_number())
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        Some(other) => serde_json::to_string(other).unwrap_or_default(),
    }
}
