// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encoder writing message trees back to ROS1 wire data.
//!
//! The output is exactly what the decoder consumes: fields concatenated in
//! schema order, little-endian, no padding. Variable-length arrays carry a
//! `u32` count prefix; fixed-length arrays do not.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::core::{CodecError, Duration, MessageKind, Result, Time};
use crate::message::{ArrayItems, ArrayMessage, Message, ValueMessage};
use crate::schema::{ArraySchema, CompoundSchema, Schema};

/// Default initial capacity for the encoder buffer.
const DEFAULT_CAPACITY: usize = 16;

/// Encode `message` with the layout of `schema`.
pub fn encode(schema: &Schema, message: &Message) -> Result<Vec<u8>> {
    let mut encoder = WireEncoder::with_capacity(serialized_size(message).max(DEFAULT_CAPACITY));
    encoder.encode(schema, message)?;
    Ok(encoder.finish())
}

/// Append the encoding of `message` to `out`.
///
/// On failure `out` is left at its original length.
pub fn encode_into(schema: &Schema, message: &Message, out: &mut Vec<u8>) -> Result<()> {
    let start = out.len();
    let mut encoder = WireEncoder {
        buffer: std::mem::take(out),
    };
    let result = encoder.encode(schema, message);
    *out = encoder.finish();
    if result.is_err() {
        out.truncate(start);
    }
    result
}

/// Bytes `message` occupies on the wire.
pub fn serialized_size(message: &Message) -> usize {
    message.wire_size()
}

/// Growable little-endian output buffer.
pub struct WireEncoder {
    buffer: Vec<u8>,
}

impl Default for WireEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl WireEncoder {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the encoder and return the written bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Append one message with the layout of `schema`.
    pub fn encode(&mut self, schema: &Schema, message: &Message) -> Result<()> {
        match (schema, message) {
            (Schema::Scalar(kind), Message::Value(value)) => {
                if value.kind() != *kind {
                    return Err(mismatch(kind.name(), value.kind().name()));
                }
                self.write_value(value)
            }
            (Schema::Compound(compound), Message::Compound(_)) => {
                self.encode_compound(compound, message)
            }
            (Schema::Array(array_schema), Message::Array(array)) => {
                self.encode_array(array_schema, array)
            }
            (schema, message) => Err(mismatch(
                schema.datatype().unwrap_or(schema.kind().name()),
                message.kind().name(),
            )),
        }
    }

    fn encode_compound(&mut self, schema: &CompoundSchema, message: &Message) -> Result<()> {
        let Some(compound) = message.as_compound() else {
            return Err(mismatch(&schema.datatype, message.kind().name()));
        };
        if compound.len() != schema.fields.len() {
            return Err(CodecError::encode(
                "ros1",
                format!(
                    "{} has {} fields, message has {}",
                    schema.datatype,
                    schema.fields.len(),
                    compound.len()
                ),
            ));
        }
        for field in &schema.fields {
            let value = compound.get(&field.name).ok_or_else(|| {
                CodecError::encode(
                    "ros1",
                    format!("missing field '{}' in {}", field.name, schema.datatype),
                )
            })?;
            self.encode(&field.schema, value)?;
        }
        Ok(())
    }

    fn encode_array(&mut self, schema: &ArraySchema, array: &ArrayMessage) -> Result<()> {
        let kind = schema.element_kind;
        if array.element_kind() != kind {
            return Err(mismatch(kind.name(), array.element_kind().name()));
        }
        if !array.items().holds(kind) {
            return Err(CodecError::encode(
                "ros1",
                format!("{kind} array storage holds other elements"),
            ));
        }
        match schema.length {
            Some(expected) if expected != array.len() => {
                return Err(CodecError::encode(
                    "ros1",
                    format!(
                        "fixed-length array expects {expected} elements, got {}",
                        array.len()
                    ),
                ));
            }
            Some(_) => {}
            None => {
                let count = u32::try_from(array.len()).map_err(|_| {
                    CodecError::encode(
                        "ros1",
                        format!("array of {} elements exceeds u32 prefix", array.len()),
                    )
                })?;
                self.buffer.write_u32::<LittleEndian>(count)?;
            }
        }

        match array.items() {
            ArrayItems::Messages(items) => {
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
                for item in items {
                    self.encode(element, item)?;
                }
                Ok(())
            }
            packed => self.write_packed(packed),
        }
    }

    fn write_value(&mut self, value: &ValueMessage) -> Result<()> {
        let out = &mut self.buffer;
        match value {
            ValueMessage::Bool(v) => out.write_u8(u8::from(*v))?,
            ValueMessage::UInt8(v) => out.write_u8(*v)?,
            ValueMessage::UInt16(v) => out.write_u16::<LittleEndian>(*v)?,
            ValueMessage::UInt32(v) => out.write_u32::<LittleEndian>(*v)?,
            ValueMessage::UInt64(v) => out.write_u64::<LittleEndian>(*v)?,
            ValueMessage::Int8(v) => out.write_i8(*v)?,
            ValueMessage::Int16(v) => out.write_i16::<LittleEndian>(*v)?,
            ValueMessage::Int32(v) => out.write_i32::<LittleEndian>(*v)?,
            ValueMessage::Int64(v) => out.write_i64::<LittleEndian>(*v)?,
            ValueMessage::Float32(v) => out.write_f32::<LittleEndian>(*v)?,
            ValueMessage::Float64(v) => out.write_f64::<LittleEndian>(*v)?,
            ValueMessage::String(s) => {
                let len = u32::try_from(s.len()).map_err(|_| {
                    CodecError::encode("ros1", "string longer than u32 prefix allows")
                })?;
                out.write_u32::<LittleEndian>(len)?;
                out.extend_from_slice(s);
            }
            ValueMessage::Time(t) => write_time(out, *t)?,
            ValueMessage::Duration(d) => write_duration(out, *d)?,
        }
        Ok(())
    }

    fn write_packed(&mut self, items: &ArrayItems) -> Result<()> {
        let out = &mut self.buffer;
        match items {
            ArrayItems::Bool(v) => out.extend(v.iter().map(|b| u8::from(*b))),
            ArrayItems::UInt8(v) => out.extend_from_slice(v),
            ArrayItems::Int8(v) => out.extend(v.iter().map(|b| *b as u8)),
            ArrayItems::UInt16(v) => v.iter().try_for_each(|x| out.write_u16::<LittleEndian>(*x))?,
            ArrayItems::UInt32(v) => v.iter().try_for_each(|x| out.write_u32::<LittleEndian>(*x))?,
            ArrayItems::UInt64(v) => v.iter().try_for_each(|x| out.write_u64::<LittleEndian>(*x))?,
            ArrayItems::Int16(v) => v.iter().try_for_each(|x| out.write_i16::<LittleEndian>(*x))?,
            ArrayItems::Int32(v) => v.iter().try_for_each(|x| out.write_i32::<LittleEndian>(*x))?,
            ArrayItems::Int64(v) => v.iter().try_for_each(|x| out.write_i64::<LittleEndian>(*x))?,
            ArrayItems::Float32(v) => {
                v.iter().try_for_each(|x| out.write_f32::<LittleEndian>(*x))?
            }
            ArrayItems::Float64(v) => {
                v.iter().try_for_each(|x| out.write_f64::<LittleEndian>(*x))?
            }
            ArrayItems::Time(v) => v.iter().try_for_each(|t| write_time(out, *t))?,
            ArrayItems::Duration(v) => v.iter().try_for_each(|d| write_duration(out, *d))?,
            ArrayItems::Messages(_) => {
                return Err(CodecError::encode("ros1", "message sequence is not packed"))
            }
        }
        Ok(())
    }
}

fn write_time(out: &mut Vec<u8>, time: Time) -> std::io::Result<()> {
    out.write_u32::<LittleEndian>(time.secs)?;
    out.write_u32::<LittleEndian>(time.nsecs)
}

fn write_duration(out: &mut Vec<u8>, duration: Duration) -> std::io::Result<()> {
    out.write_i32::<LittleEndian>(duration.secs)?;
    out.write_i32::<LittleEndian>(duration.nsecs)
}

fn mismatch(expected: &str, found: &str) -> CodecError {
    CodecError::encode("ros1", format!("expected {expected}, found {found}"))
}
