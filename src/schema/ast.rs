// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema tree describing the wire layout of a message.
//!
//! A [`Schema`] is immutable once built and owns its child schemas. It is
//! shared read-only (usually behind an `Arc`) by every decode call that uses
//! it. Compound field order is wire order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{CodecError, MessageKind, Result};

/// Shape of a message: a scalar, a compound of named fields, or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// A single primitive value
    Scalar(MessageKind),
    /// Ordered named fields
    Compound(CompoundSchema),
    /// Fixed or variable length sequence
    Array(ArraySchema),
}

/// A compound type: type name plus ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundSchema {
    /// Type name (e.g., "geometry_msgs/Point")
    pub datatype: String,
    /// Fields in wire order
    pub fields: Vec<SchemaField>,
}

/// A named field of a compound schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Field name
    pub name: String,
    /// Field shape
    pub schema: Schema,
}

/// An array type.
///
/// Serialized with the `-1`-sentinel length so that stored schemas pass
/// through [`ArraySchema::from_raw_length`] when loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawArraySchema", into = "RawArraySchema")]
pub struct ArraySchema {
    /// Kind of every element
    pub element_kind: MessageKind,
    /// Element count (None = variable length, prefixed on the wire)
    pub length: Option<usize>,
    /// Element shape, present for string, compound and array elements
    pub element: Option<Box<Schema>>,
}

#[derive(Serialize, Deserialize)]
struct RawArraySchema {
    element_kind: MessageKind,
    length: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    element: Option<Box<Schema>>,
}

impl TryFrom<RawArraySchema> for ArraySchema {
    type Error = CodecError;

    fn try_from(raw: RawArraySchema) -> Result<Self> {
        ArraySchema::from_raw_length(raw.element_kind, raw.length, raw.element.map(|e| *e))
    }
}

impl From<ArraySchema> for RawArraySchema {
    fn from(array: ArraySchema) -> Self {
        Self {
            element_kind: array.element_kind,
            length: array.raw_length(),
            element: array.element,
        }
    }
}

impl Schema {
    /// Create a scalar schema.
    pub fn scalar(kind: MessageKind) -> Self {
        Schema::Scalar(kind)
    }

    /// Create a compound schema from `(name, schema)` pairs.
    pub fn compound<I, S>(datatype: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Schema)>,
        S: Into<String>,
    {
        Schema::Compound(CompoundSchema {
            datatype: datatype.into(),
            fields: fields
                .into_iter()
                .map(|(name, schema)| SchemaField {
                    name: name.into(),
                    schema,
                })
                .collect(),
        })
    }

    /// Create a compound schema, rejecting duplicate field names.
    pub fn try_compound<I, S>(datatype: impl Into<String>, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Schema)>,
        S: Into<String>,
    {
        let schema = Self::compound(datatype, fields);
        if let Schema::Compound(compound) = &schema {
            compound.check_unique_names()?;
        }
        Ok(schema)
    }

    /// Check every compound in the tree for duplicate field names.
    ///
    /// Trees built with [`Schema::compound`] or loaded from JSON are not
    /// checked on construction.
    pub fn validate(&self) -> Result<()> {
        match self {
            Schema::Scalar(_) => Ok(()),
            Schema::Compound(compound) => {
                compound.check_unique_names()?;
                compound.fields.iter().try_for_each(|f| f.schema.validate())
            }
            Schema::Array(array) => match &array.element {
                Some(element) => element.validate(),
                None => Ok(()),
            },
        }
    }

    /// Create an array schema whose elements have the shape of `element`.
    ///
    /// Packed element kinds keep only their kind; the element schema is
    /// retained for string, compound and array elements.
    pub fn array(element: Schema, length: Option<usize>) -> Self {
        let element_kind = element.kind();
        let element = if element_kind.is_packed() {
            None
        } else {
            Some(Box::new(element))
        };
        Schema::Array(ArraySchema {
            element_kind,
            length,
            element,
        })
    }

    /// Create an array of primitive elements.
    pub fn array_of(kind: MessageKind, length: Option<usize>) -> Self {
        Self::array(Schema::Scalar(kind), length)
    }

    /// Kind tag of this schema.
    pub fn kind(&self) -> MessageKind {
        match self {
            Schema::Scalar(kind) => *kind,
            Schema::Compound(_) => MessageKind::Compound,
            Schema::Array(_) => MessageKind::Array,
        }
    }

    /// Type name for compound schemas.
    pub fn datatype(&self) -> Option<&str> {
        match self {
            Schema::Compound(c) => Some(&c.datatype),
            _ => None,
        }
    }

    /// Borrow as a compound schema.
    pub fn as_compound(&self) -> Option<&CompoundSchema> {
        match self {
            Schema::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Borrow as an array schema.
    pub fn as_array(&self) -> Option<&ArraySchema> {
        match self {
            Schema::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Wire size in bytes when every instance has the same size.
    pub fn fixed_wire_size(&self) -> Option<usize> {
        match self {
            Schema::Scalar(kind) => kind.wire_size(),
            Schema::Compound(c) => c
                .fields
                .iter()
                .try_fold(0usize, |acc, f| Some(acc + f.schema.fixed_wire_size()?)),
            Schema::Array(a) => {
                let length = a.length?;
                let element_size = match &a.element {
                    Some(element) => element.fixed_wire_size()?,
                    None => a.element_kind.wire_size()?,
                };
                Some(length * element_size)
            }
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, name: &str, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Schema::Scalar(kind) => writeln!(f, "{indent}{kind} {name}"),
            Schema::Compound(c) => {
                writeln!(f, "{indent}{} {name}", c.datatype)?;
                for field in &c.fields {
                    field.schema.write_tree(f, &field.name, depth + 1)?;
                }
                Ok(())
            }
            Schema::Array(a) => {
                let suffix = match a.length {
                    Some(n) => format!("[{n}]"),
                    None => "[]".to_string(),
                };
                match a.element.as_deref() {
                    Some(Schema::Compound(c)) => {
                        writeln!(f, "{indent}{}{suffix} {name}", c.datatype)?;
                        for field in &c.fields {
                            field.schema.write_tree(f, &field.name, depth + 1)?;
                        }
                        Ok(())
                    }
                    Some(Schema::Array(_)) => {
                        writeln!(f, "{indent}array{suffix} {name}")?;
                        if let Some(element) = &a.element {
                            element.write_tree(f, "<element>", depth + 1)?;
                        }
                        Ok(())
                    }
                    _ => writeln!(f, "{indent}{}{suffix} {name}", a.element_kind),
                }
            }
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Compound(c) => {
                writeln!(f, "{}", c.datatype)?;
                for field in &c.fields {
                    field.schema.write_tree(f, &field.name, 1)?;
                }
                Ok(())
            }
            other => other.write_tree(f, "<root>", 0),
        }
    }
}

impl CompoundSchema {
    /// Look up a field schema by name.
    pub fn field(&self, name: &str) -> Option<&Schema> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.schema)
    }

    /// Field names in wire order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    fn check_unique_names(&self) -> Result<()> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(CodecError::invalid_schema(
                    &self.datatype,
                    format!("duplicate field '{}'", field.name),
                ));
            }
        }
        Ok(())
    }
}

impl ArraySchema {
    /// Build from the `-1`-sentinel length form used by stored schemas.
    ///
    /// `-1` means variable length; any other negative length is rejected.
    pub fn from_raw_length(
        element_kind: MessageKind,
        raw_length: i64,
        element: Option<Schema>,
    ) -> Result<Self> {
        let length = match raw_length {
            -1 => None,
            n => Some(usize::try_from(n).map_err(|_| {
                CodecError::invalid_schema(
                    format!("{element_kind}[]"),
                    format!("invalid array length {n}"),
                )
            })?),
        };
        Ok(Self {
            element_kind,
            length,
            element: element.map(Box::new),
        })
    }

    /// Length in the `-1`-sentinel form.
    pub fn raw_length(&self) -> i64 {
        self.length.map_or(-1, |n| n as i64)
    }

    /// Whether the element count is baked into the schema.
    pub fn is_fixed_length(&self) -> bool {
        self.length.is_some()
    }
}
