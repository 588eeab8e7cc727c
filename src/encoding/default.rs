// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Default-initialized message trees built from a schema alone.

use crate::core::{CodecError, MessageKind, Result};
use crate::message::{ArrayItems, ArrayMessage, CompoundMessage, Message, ValueMessage};
use crate::schema::{ArraySchema, Schema};

/// Build a tree of zero values with the shape of `schema`.
///
/// Fixed-length arrays are filled with `length` default elements.
/// Variable-length arrays are empty.
///
/// # Example
///
/// ```
/// use robomsg::{build_default, MessageKind, Schema};
///
/// let schema = Schema::compound(
///     "geometry_msgs/Point",
///     [
///         ("x", Schema::scalar(MessageKind::Float64)),
///         ("y", Schema::scalar(MessageKind::Float64)),
///     ],
/// );
/// let point = build_default(&schema).unwrap();
/// assert_eq!(point["x"].as_f64(), Some(0.0));
/// ```
pub fn build_default(schema: &Schema) -> Result<Message> {
    match schema {
        Schema::Scalar(kind) => Ok(Message::Value(ValueMessage::default_for(*kind)?)),
        Schema::Compound(compound) => {
            let mut message =
                CompoundMessage::with_capacity(&compound.datatype, compound.fields.len());
            for field in &compound.fields {
                let value = build_default(&field.schema)?;
                if message.insert(field.name.as_str(), value).is_some() {
                    return Err(CodecError::invalid_schema(
                        &compound.datatype,
                        format!("duplicate field '{}'", field.name),
                    ));
                }
            }
            Ok(Message::Compound(message))
        }
        Schema::Array(array) => build_default_array(array),
    }
}

fn build_default_array(schema: &ArraySchema) -> Result<Message> {
    let kind = schema.element_kind;
    let length = schema.length.unwrap_or(0);

    let items = if kind.is_packed() {
        ArrayItems::with_defaults(kind, length)
    } else {
        let mut items = Vec::with_capacity(length);
        if length > 0 {
            let string_element = Schema::Scalar(MessageKind::String);
            let element = match (schema.element.as_deref(), kind) {
                (Some(element), _) => element,
                (None, MessageKind::String) => &string_element,
                (None, _) => {
                    return Err(CodecError::invalid_schema(
                        "array",
                        format!("{kind} elements require an element schema"),
                    ))
                }
            };
            for _ in 0..length {
                items.push(build_default(element)?);
            }
        }
        ArrayItems::Messages(items)
    };

    Ok(Message::Array(ArrayMessage::new(
        kind,
        schema.is_fixed_length(),
        items,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Time;

    #[test]
    fn test_scalar_defaults() {
        assert_eq!(
            build_default(&Schema::scalar(MessageKind::Bool)).unwrap(),
            Message::from(false)
        );
        assert_eq!(
            build_default(&Schema::scalar(MessageKind::String)).unwrap(),
            Message::from("")
        );
        assert_eq!(
            build_default(&Schema::scalar(MessageKind::Time)).unwrap(),
            Message::from(Time::new(0, 0))
        );
    }

    #[test]
    fn test_scalar_schema_with_structural_kind_fails() {
        let err = build_default(&Schema::Scalar(MessageKind::Array)).unwrap_err();
        assert_eq!(err, CodecError::invalid_scalar_kind(MessageKind::Array));
    }

    #[test]
    fn test_fixed_packed_array() {
        let message = build_default(&Schema::array_of(MessageKind::Float64, Some(9))).unwrap();
        let array = message.as_array().unwrap();
        assert_eq!(array.as_f64_slice(), Some(&[0.0; 9][..]));
        assert!(array.is_fixed_length());
    }

    #[test]
    fn test_fixed_compound_array() {
        let point = Schema::compound("test/P", [("x", Schema::scalar(MessageKind::Int32))]);
        let message = build_default(&Schema::array(point, Some(2))).unwrap();
        let array = message.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array.message(1).unwrap()["x"].as_i64(), Some(0));
    }

    #[test]
    fn test_variable_arrays_are_empty() {
        let point = Schema::compound("test/P", [("x", Schema::scalar(MessageKind::Int32))]);
        for schema in [
            Schema::array_of(MessageKind::UInt8, None),
            Schema::array_of(MessageKind::String, None),
            Schema::array(point, None),
        ] {
            let message = build_default(&schema).unwrap();
            let array = message.as_array().unwrap();
            assert!(array.is_empty());
            assert!(!array.is_fixed_length());
        }
    }

    #[test]
    fn test_missing_element_schema() {
        let schema = Schema::Array(ArraySchema {
            element_kind: MessageKind::Compound,
            length: Some(1),
            element: None,
        });
        assert!(matches!(
            build_default(&schema),
            Err(CodecError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_duplicate_field_fails() {
        let schema = Schema::compound(
            "test/Twice",
            [
                ("x", Schema::scalar(MessageKind::Int32)),
                ("x", Schema::scalar(MessageKind::Float64)),
            ],
        );
        assert_eq!(
            build_default(&schema).unwrap_err(),
            CodecError::invalid_schema("test/Twice", "duplicate field 'x'")
        );
    }
}
