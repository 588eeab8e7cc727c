// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven decoder for ROS1 wire data.
//!
//! Decoding walks the schema tree and consumes bytes in field order. Every
//! read is bounds-checked before it executes, so a truncated buffer fails
//! with [`CodecError::BufferTooShort`] at the first field that does not fit.
//! On failure no partial tree is returned.

use byteorder::{ByteOrder, LittleEndian};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{CodecError, Duration, MessageKind, Result, Time};
use crate::message::{ArrayItems, ArrayMessage, CompoundMessage, Message, ValueMessage};
use crate::schema::{ArraySchema, CompoundSchema, Schema};

use super::cursor::WireCursor;

/// Maximum allowed array length to prevent OOM attacks.
pub const MAX_ARRAY_LENGTH: usize = 10_000_000;

/// Decoder settings.
///
/// Deserializable so it can be loaded from a TOML config file; missing keys
/// take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Largest element count accepted from a variable-length prefix
    pub max_array_length: usize,
    /// Accept leftover bytes in [`MessageDecoder::decode_exact`]
    pub allow_trailing_bytes: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_array_length: MAX_ARRAY_LENGTH,
            allow_trailing_bytes: false,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_array_length(mut self, limit: usize) -> Self {
        self.max_array_length = limit;
        self
    }

    pub fn with_allow_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }
}

/// Decode one primitive value from the start of `data`.
///
/// Returns the value node and the number of bytes consumed. Compound and
/// array kinds fail with `InvalidScalarKind`.
pub fn decode_scalar(kind: MessageKind, data: &[u8]) -> Result<(Message, usize)> {
    let mut cursor = WireCursor::new(data);
    let value = read_value(kind, &mut cursor)?;
    Ok((Message::Value(value), cursor.position()))
}

/// Decode a message of shape `schema` from the start of `data`.
///
/// Returns the tree and the exact number of bytes consumed.
pub fn decode(schema: &Schema, data: &[u8]) -> Result<(Message, usize)> {
    MessageDecoder::new().decode(schema, data)
}

/// Like [`decode`], reading at most `length` bytes of `data`.
pub fn decode_with_limit(schema: &Schema, data: &[u8], length: usize) -> Result<(Message, usize)> {
    MessageDecoder::new().decode_with_limit(schema, data, length)
}

/// Decoder carrying [`DecodeOptions`].
///
/// Holds no per-call state; one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct MessageDecoder {
    options: DecodeOptions,
}

impl MessageDecoder {
    /// Create a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode one message from the start of `data`.
    pub fn decode(&self, schema: &Schema, data: &[u8]) -> Result<(Message, usize)> {
        self.decode_with_limit(schema, data, data.len())
    }

    /// Decode one message, reading at most `length` bytes of `data`.
    pub fn decode_with_limit(
        &self,
        schema: &Schema,
        data: &[u8],
        length: usize,
    ) -> Result<(Message, usize)> {
        let mut cursor = WireCursor::with_limit(data, length);
        match self.decode_node(schema, &mut cursor) {
            Ok(message) => {
                trace!(
                    kind = %schema.kind(),
                    datatype = schema.datatype().unwrap_or(""),
                    consumed = cursor.position(),
                    "decoded message"
                );
                Ok((message, cursor.position()))
            }
            Err(e) => {
                debug!(
                    kind = %schema.kind(),
                    datatype = schema.datatype().unwrap_or(""),
                    fields = ?e.log_fields(),
                    "decode failed: {e}"
                );
                Err(e)
            }
        }
    }

    /// Decode one message that must span all of `data`.
    ///
    /// Leftover bytes fail with `TrailingBytes` unless the options allow
    /// them, in which case they are logged and ignored.
    pub fn decode_exact(&self, schema: &Schema, data: &[u8]) -> Result<Message> {
        let (message, consumed) = self.decode(schema, data)?;
        let remaining = data.len() - consumed;
        if remaining > 0 {
            if !self.options.allow_trailing_bytes {
                return Err(CodecError::trailing_bytes(consumed, remaining));
            }
            warn!(consumed, remaining, "ignoring trailing bytes after message");
        }
        Ok(message)
    }

    /// Iterate over consecutive messages packed back to back in `data`.
    pub fn decode_stream<'d, 's>(
        &'d self,
        schema: &'s Schema,
        data: &'d [u8],
    ) -> MessageStream<'d, 's> {
        MessageStream {
            decoder: self,
            schema,
            data,
            offset: 0,
            done: false,
        }
    }

    /// Decode independent buffers in parallel against one shared schema.
    ///
    /// Results are returned in input order.
    pub fn decode_batch<B>(&self, schema: &Schema, buffers: &[B]) -> Vec<Result<(Message, usize)>>
    where
        B: AsRef<[u8]> + Sync,
    {
        buffers
            .par_iter()
            .map(|buffer| self.decode(schema, buffer.as_ref()))
            .collect()
    }

    fn decode_node(&self, schema: &Schema, cursor: &mut WireCursor<'_>) -> Result<Message> {
        match schema {
            Schema::Scalar(kind) => Ok(Message::Value(read_value(*kind, cursor)?)),
            Schema::Compound(compound) => self.decode_compound(compound, cursor),
            Schema::Array(array) => self.decode_array(array, cursor),
        }
    }

    fn decode_compound(
        &self,
        schema: &CompoundSchema,
        cursor: &mut WireCursor<'_>,
    ) -> Result<Message> {
        let mut message = CompoundMessage::with_capacity(&schema.datatype, schema.fields.len());
        for field in &schema.fields {
            let value = self.decode_node(&field.schema, cursor)?;
            if message.insert(field.name.as_str(), value).is_some() {
                return Err(CodecError::invalid_schema(
                    &schema.datatype,
                    format!("duplicate field '{}'", field.name),
                ));
            }
        }
        Ok(Message::Compound(message))
    }

    fn decode_array(&self, schema: &ArraySchema, cursor: &mut WireCursor<'_>) -> Result<Message> {
        let (length, prefix_position) = match schema.length {
            Some(length) => (length, None),
            None => {
                let position = cursor.position();
                let length = cursor.read_u32()? as usize;
                if length > self.options.max_array_length {
                    return Err(CodecError::length_exceeded(
                        length,
                        position,
                        self.options.max_array_length,
                    ));
                }
                (length, Some(position))
            }
        };

        let kind = schema.element_kind;
        let items = if kind.is_packed() {
            read_packed_items(kind, length, cursor)?
        } else {
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
            // Zero-width elements consume nothing, so a prefixed count of them
            // is capped by the remaining input instead.
            if let Some(position) = prefix_position {
                if element.fixed_wire_size() == Some(0) && length > cursor.remaining() {
                    return Err(CodecError::length_exceeded(
                        length,
                        position,
                        cursor.remaining(),
                    ));
                }
            }
            let mut items = Vec::with_capacity(length.min(cursor.remaining()));
            for _ in 0..length {
                items.push(self.decode_node(element, cursor)?);
            }
            ArrayItems::Messages(items)
        };

        let array = ArrayMessage::new(kind, schema.is_fixed_length(), items)?;
        Ok(Message::Array(array))
    }
}

/// Iterator over messages concatenated in one buffer.
///
/// Yields each message with its consumed byte count. Stops after the buffer
/// is exhausted or after the first error.
pub struct MessageStream<'d, 's> {
    decoder: &'d MessageDecoder,
    schema: &'s Schema,
    data: &'d [u8],
    offset: usize,
    done: bool,
}

impl MessageStream<'_, '_> {
    /// Offset of the next message in the buffer.
    pub fn position(&self) -> usize {
        self.offset
    }
}

impl Iterator for MessageStream<'_, '_> {
    type Item = Result<(Message, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.data.len() {
            return None;
        }
        match self.decoder.decode(self.schema, &self.data[self.offset..]) {
            Ok((message, consumed)) => {
                self.offset += consumed;
                // A zero-width message would never advance.
                if consumed == 0 {
                    self.done = true;
                }
                Some(Ok((message, consumed)))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn read_value(kind: MessageKind, cursor: &mut WireCursor<'_>) -> Result<ValueMessage> {
    Ok(match kind {
        MessageKind::Bool => ValueMessage::Bool(cursor.read_bool()?),
        MessageKind::UInt8 => ValueMessage::UInt8(cursor.read_u8()?),
        MessageKind::UInt16 => ValueMessage::UInt16(cursor.read_u16()?),
        MessageKind::UInt32 => ValueMessage::UInt32(cursor.read_u32()?),
        MessageKind::UInt64 => ValueMessage::UInt64(cursor.read_u64()?),
        MessageKind::Int8 => ValueMessage::Int8(cursor.read_i8()?),
        MessageKind::Int16 => ValueMessage::Int16(cursor.read_i16()?),
        MessageKind::Int32 => ValueMessage::Int32(cursor.read_i32()?),
        MessageKind::Int64 => ValueMessage::Int64(cursor.read_i64()?),
        MessageKind::Float32 => ValueMessage::Float32(cursor.read_f32()?),
        MessageKind::Float64 => ValueMessage::Float64(cursor.read_f64()?),
        MessageKind::String => ValueMessage::String(cursor.read_string()?),
        MessageKind::Time => ValueMessage::Time(cursor.read_time()?),
        MessageKind::Duration => ValueMessage::Duration(cursor.read_duration()?),
        MessageKind::Compound | MessageKind::Array => {
            return Err(CodecError::invalid_scalar_kind(kind))
        }
    })
}

fn read_packed_items(
    kind: MessageKind,
    length: usize,
    cursor: &mut WireCursor<'_>,
) -> Result<ArrayItems> {
    Ok(match kind {
        MessageKind::Bool => ArrayItems::Bool(cursor.read_packed(length, 1, false, |src, dst| {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = *s != 0;
            }
        })?),
        MessageKind::UInt8 => ArrayItems::UInt8(
            cursor.read_packed(length, 1, 0u8, |src, dst| dst.copy_from_slice(src))?,
        ),
        MessageKind::Int8 => ArrayItems::Int8(cursor.read_packed(length, 1, 0i8, |src, dst| {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = *s as i8;
            }
        })?),
        MessageKind::UInt16 => {
            ArrayItems::UInt16(cursor.read_packed(length, 2, 0, LittleEndian::read_u16_into)?)
        }
        MessageKind::Int16 => {
            ArrayItems::Int16(cursor.read_packed(length, 2, 0, LittleEndian::read_i16_into)?)
        }
        MessageKind::UInt32 => {
            ArrayItems::UInt32(cursor.read_packed(length, 4, 0, LittleEndian::read_u32_into)?)
        }
        MessageKind::Int32 => {
            ArrayItems::Int32(cursor.read_packed(length, 4, 0, LittleEndian::read_i32_into)?)
        }
        MessageKind::UInt64 => {
            ArrayItems::UInt64(cursor.read_packed(length, 8, 0, LittleEndian::read_u64_into)?)
        }
        MessageKind::Int64 => {
            ArrayItems::Int64(cursor.read_packed(length, 8, 0, LittleEndian::read_i64_into)?)
        }
        MessageKind::Float32 => {
            ArrayItems::Float32(cursor.read_packed(length, 4, 0.0, LittleEndian::read_f32_into)?)
        }
        MessageKind::Float64 => {
            ArrayItems::Float64(cursor.read_packed(length, 8, 0.0, LittleEndian::read_f64_into)?)
        }
        MessageKind::Time => {
            ArrayItems::Time(cursor.read_packed(length, 8, Time::default(), |src, dst| {
                for (d, chunk) in dst.iter_mut().zip(src.chunks_exact(8)) {
                    *d = Time::new(
                        LittleEndian::read_u32(&chunk[..4]),
                        LittleEndian::read_u32(&chunk[4..]),
                    );
                }
            })?)
        }
        MessageKind::Duration => ArrayItems::Duration(cursor.read_packed(
            length,
            8,
            Duration::default(),
            |src, dst| {
                for (d, chunk) in dst.iter_mut().zip(src.chunks_exact(8)) {
                    *d = Duration::new(
                        LittleEndian::read_i32(&chunk[..4]),
                        LittleEndian::read_i32(&chunk[4..]),
                    );
                }
            },
        )?),
        MessageKind::String | MessageKind::Compound | MessageKind::Array => {
            return Err(CodecError::invalid_schema(
                "array",
                format!("{kind} elements are not packed"),
            ))
        }
    })
}
