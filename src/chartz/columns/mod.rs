//! # Column System
//!
//! This module provides the typed column schema that projects a chart's JSON
//! document into an editable table. Instead of handling each field ad-hoc,
//! the column system provides:
//!
//! - **Specifications**: A fixed, order-significant registry of columns and
//!   their kinds (`COLUMNS`)
//! - **Coercion**: Raw edit text to typed values, with range and shape checks
//! - **Formatting**: Typed values back to the text an edit field shows
//!
//! ## Column Kinds
//!
//! | Kind | Examples | Description |
//! |------|----------|-------------|
//! | `Text` | `name`, `author` | Single-line unless the spec is multiline |
//! | `Integer` | `year`, `timesig` | Non-negative whole number |
//! | `Float` | `tempo`, `endpoint` | Non-negative real number |
//! | `Range` | `difficulty` | Whole number within a closed range |
//! | `Rgb` | `note_color_start` | Three floats in \[0, 1\], or absent |
//! | `OptionalInteger` | `UNK1` | Non-negative whole number, or absent |
//!
//! Coercion and formatting are inverses: for every typed value a column
//! accepts, formatting it and coercing the result yields the value back.

mod spec;
mod value;

pub use spec::{column_keys, get_spec, position, ColumnKind, ColumnSpec, COLUMNS};
pub use value::{coerce, format_value, stored_text, CellValue, FieldValue};
