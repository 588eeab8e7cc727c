// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Array message nodes.
//!
//! Arrays of fixed-width primitives (including time and duration) are stored
//! as one packed `Vec` of native values. Arrays of strings, compounds and
//! arrays are stored as a sequence of owned child messages.

use crate::core::{CodecError, Duration, MessageKind, Result, Time};

use super::{Message, ValueMessage};

/// Element storage of an [`ArrayMessage`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayItems {
    Bool(Vec<bool>),
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Time(Vec<Time>),
    Duration(Vec<Duration>),
    /// One child message per element (string, compound or array elements)
    Messages(Vec<Message>),
}

impl ArrayItems {
    /// Storage holding `len` zero values of a packed kind.
    ///
    /// Non-packed kinds get an empty message sequence; their elements need
    /// a schema to be built.
    pub fn with_defaults(kind: MessageKind, len: usize) -> Self {
        match kind {
            MessageKind::Bool => ArrayItems::Bool(vec![false; len]),
            MessageKind::UInt8 => ArrayItems::UInt8(vec![0; len]),
            MessageKind::UInt16 => ArrayItems::UInt16(vec![0; len]),
            MessageKind::UInt32 => ArrayItems::UInt32(vec![0; len]),
            MessageKind::UInt64 => ArrayItems::UInt64(vec![0; len]),
            MessageKind::Int8 => ArrayItems::Int8(vec![0; len]),
            MessageKind::Int16 => ArrayItems::Int16(vec![0; len]),
            MessageKind::Int32 => ArrayItems::Int32(vec![0; len]),
            MessageKind::Int64 => ArrayItems::Int64(vec![0; len]),
            MessageKind::Float32 => ArrayItems::Float32(vec![0.0; len]),
            MessageKind::Float64 => ArrayItems::Float64(vec![0.0; len]),
            MessageKind::Time => ArrayItems::Time(vec![Time::default(); len]),
            MessageKind::Duration => ArrayItems::Duration(vec![Duration::default(); len]),
            MessageKind::String | MessageKind::Compound | MessageKind::Array => {
                ArrayItems::Messages(Vec::new())
            }
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            ArrayItems::Bool(v) => v.len(),
            ArrayItems::UInt8(v) => v.len(),
            ArrayItems::UInt16(v) => v.len(),
            ArrayItems::UInt32(v) => v.len(),
            ArrayItems::UInt64(v) => v.len(),
            ArrayItems::Int8(v) => v.len(),
            ArrayItems::Int16(v) => v.len(),
            ArrayItems::Int32(v) => v.len(),
            ArrayItems::Int64(v) => v.len(),
            ArrayItems::Float32(v) => v.len(),
            ArrayItems::Float64(v) => v.len(),
            ArrayItems::Time(v) => v.len(),
            ArrayItems::Duration(v) => v.len(),
            ArrayItems::Messages(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this storage can hold elements of `kind`.
    pub fn holds(&self, kind: MessageKind) -> bool {
        matches!(
            (self, kind),
            (ArrayItems::Bool(_), MessageKind::Bool)
                | (ArrayItems::UInt8(_), MessageKind::UInt8)
                | (ArrayItems::UInt16(_), MessageKind::UInt16)
                | (ArrayItems::UInt32(_), MessageKind::UInt32)
                | (ArrayItems::UInt64(_), MessageKind::UInt64)
                | (ArrayItems::Int8(_), MessageKind::Int8)
                | (ArrayItems::Int16(_), MessageKind::Int16)
                | (ArrayItems::Int32(_), MessageKind::Int32)
                | (ArrayItems::Int64(_), MessageKind::Int64)
                | (ArrayItems::Float32(_), MessageKind::Float32)
                | (ArrayItems::Float64(_), MessageKind::Float64)
                | (ArrayItems::Time(_), MessageKind::Time)
                | (ArrayItems::Duration(_), MessageKind::Duration)
                | (
                    ArrayItems::Messages(_),
                    MessageKind::String | MessageKind::Compound | MessageKind::Array
                )
        )
    }

    /// Element `index` of packed storage as a value.
    pub fn value(&self, index: usize) -> Option<ValueMessage> {
        match self {
            ArrayItems::Bool(v) => v.get(index).copied().map(ValueMessage::Bool),
            ArrayItems::UInt8(v) => v.get(index).copied().map(ValueMessage::UInt8),
            ArrayItems::UInt16(v) => v.get(index).copied().map(ValueMessage::UInt16),
            ArrayItems::UInt32(v) => v.get(index).copied().map(ValueMessage::UInt32),
            ArrayItems::UInt64(v) => v.get(index).copied().map(ValueMessage::UInt64),
            ArrayItems::Int8(v) => v.get(index).copied().map(ValueMessage::Int8),
            ArrayItems::Int16(v) => v.get(index).copied().map(ValueMessage::Int16),
            ArrayItems::Int32(v) => v.get(index).copied().map(ValueMessage::Int32),
            ArrayItems::Int64(v) => v.get(index).copied().map(ValueMessage::Int64),
            ArrayItems::Float32(v) => v.get(index).copied().map(ValueMessage::Float32),
            ArrayItems::Float64(v) => v.get(index).copied().map(ValueMessage::Float64),
            ArrayItems::Time(v) => v.get(index).copied().map(ValueMessage::Time),
            ArrayItems::Duration(v) => v.get(index).copied().map(ValueMessage::Duration),
            ArrayItems::Messages(v) => match v.get(index) {
                Some(Message::Value(value)) => Some(value.clone()),
                _ => None,
            },
        }
    }
}

/// Sequence of same-kind elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayMessage {
    element_kind: MessageKind,
    fixed_length: bool,
    items: ArrayItems,
}

macro_rules! slice_getters {
    ($($name:ident => $variant:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(&self) -> Option<&[$ty]> {
                match &self.items {
                    ArrayItems::$variant(v) => Some(v),
                    _ => None,
                }
            }
        )*
    };
}

impl ArrayMessage {
    /// Create an array over existing storage.
    ///
    /// Fails with `InvalidSchema` if the storage cannot hold `element_kind`.
    pub fn new(element_kind: MessageKind, fixed_length: bool, items: ArrayItems) -> Result<Self> {
        if !items.holds(element_kind) {
            return Err(storage_mismatch(element_kind));
        }
        Ok(Self {
            element_kind,
            fixed_length,
            items,
        })
    }

    /// Create an empty array.
    pub fn empty(element_kind: MessageKind, fixed_length: bool) -> Self {
        Self {
            element_kind,
            fixed_length,
            items: ArrayItems::with_defaults(element_kind, 0),
        }
    }

    pub fn element_kind(&self) -> MessageKind {
        self.element_kind
    }

    /// Whether the element count is fixed by the schema.
    pub fn is_fixed_length(&self) -> bool {
        self.fixed_length
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &ArrayItems {
        &self.items
    }

    /// Raw access to the element storage.
    pub fn items_mut(&mut self) -> &mut ArrayItems {
        &mut self.items
    }

    pub fn into_items(self) -> ArrayItems {
        self.items
    }

    /// Child messages of a string, compound or array-of-array array.
    pub fn messages(&self) -> Option<&[Message]> {
        match &self.items {
            ArrayItems::Messages(v) => Some(v),
            _ => None,
        }
    }

    pub fn messages_mut(&mut self) -> Option<&mut Vec<Message>> {
        match &mut self.items {
            ArrayItems::Messages(v) => Some(v),
            _ => None,
        }
    }

    /// Child message at `index` for sequence storage.
    pub fn message(&self, index: usize) -> Option<&Message> {
        self.messages().and_then(|m| m.get(index))
    }

    /// Element at `index` as a value, for packed and string arrays.
    pub fn value(&self, index: usize) -> Option<ValueMessage> {
        self.items.value(index)
    }

    slice_getters! {
        as_bool_slice => Bool: bool,
        as_u8_slice => UInt8: u8,
        as_u16_slice => UInt16: u16,
        as_u32_slice => UInt32: u32,
        as_u64_slice => UInt64: u64,
        as_i8_slice => Int8: i8,
        as_i16_slice => Int16: i16,
        as_i32_slice => Int32: i32,
        as_i64_slice => Int64: i64,
        as_f32_slice => Float32: f32,
        as_f64_slice => Float64: f64,
        as_time_slice => Time: Time,
        as_duration_slice => Duration: Duration,
    }

    /// Append one element.
    ///
    /// Fails on a fixed-length array or when `element` is not of the
    /// element kind.
    pub fn push(&mut self, element: Message) -> Result<()> {
        if self.fixed_length {
            return Err(CodecError::invalid_schema(
                "array",
                "cannot append to a fixed-length array",
            ));
        }
        let kind = element.kind();
        if kind != self.element_kind {
            return Err(CodecError::invalid_schema(
                "array",
                format!("expected {} element, got {kind}", self.element_kind),
            ));
        }
        match (&mut self.items, element) {
            (ArrayItems::Messages(v), element) => {
                v.push(element);
                Ok(())
            }
            (items, Message::Value(value)) => push_value(items, value),
            _ => Err(storage_mismatch(self.element_kind)),
        }
    }
}

fn storage_mismatch(kind: MessageKind) -> CodecError {
    CodecError::invalid_schema("array", format!("storage does not hold {kind} elements"))
}

fn push_value(items: &mut ArrayItems, value: ValueMessage) -> Result<()> {
    match (items, value) {
        (ArrayItems::Bool(v), ValueMessage::Bool(x)) => v.push(x),
        (ArrayItems::UInt8(v), ValueMessage::UInt8(x)) => v.push(x),
        (ArrayItems::UInt16(v), ValueMessage::UInt16(x)) => v.push(x),
        (ArrayItems::UInt32(v), ValueMessage::UInt32(x)) => v.push(x),
        (ArrayItems::UInt64(v), ValueMessage::UInt64(x)) => v.push(x),
        (ArrayItems::Int8(v), ValueMessage::Int8(x)) => v.push(x),
        (ArrayItems::Int16(v), ValueMessage::Int16(x)) => v.push(x),
        (ArrayItems::Int32(v), ValueMessage::Int32(x)) => v.push(x),
        (ArrayItems::Int64(v), ValueMessage::Int64(x)) => v.push(x),
        (ArrayItems::Float32(v), ValueMessage::Float32(x)) => v.push(x),
        (ArrayItems::Float64(v), ValueMessage::Float64(x)) => v.push(x),
        (ArrayItems::Time(v), ValueMessage::Time(x)) => v.push(x),
        (ArrayItems::Duration(v), ValueMessage::Duration(x)) => v.push(x),
        (_, value) => return Err(storage_mismatch(value.kind())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::CompoundMessage;

    #[test]
    fn test_with_defaults_packed() {
        let items = ArrayItems::with_defaults(MessageKind::Float32, 3);
        assert_eq!(items, ArrayItems::Float32(vec![0.0; 3]));
        assert!(items.holds(MessageKind::Float32));
        assert!(!items.holds(MessageKind::Float64));
    }

    #[test]
    fn test_with_defaults_sequence() {
        let items = ArrayItems::with_defaults(MessageKind::Compound, 3);
        assert!(items.is_empty());
        assert!(items.holds(MessageKind::String));
    }

    #[test]
    fn test_new_rejects_mismatched_storage() {
        let err = ArrayMessage::new(MessageKind::UInt16, false, ArrayItems::UInt8(vec![1]))
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidSchema { .. }));
    }

    #[test]
    fn test_push_packed() {
        let mut array = ArrayMessage::empty(MessageKind::UInt8, false);
        array.push(Message::from(1u8)).unwrap();
        array.push(Message::from(2u8)).unwrap();
        assert_eq!(array.as_u8_slice(), Some(&[1u8, 2][..]));
        assert_eq!(array.value(1), Some(ValueMessage::UInt8(2)));

        let err = array.push(Message::from(3u16)).unwrap_err();
        assert!(matches!(err, CodecError::InvalidSchema { .. }));
    }

    #[test]
    fn test_push_messages() {
        let mut array = ArrayMessage::empty(MessageKind::Compound, false);
        array
            .push(Message::Compound(CompoundMessage::new("test/Item")))
            .unwrap();
        assert_eq!(array.len(), 1);
        assert!(array.message(0).unwrap().as_compound().is_some());

        let mut strings = ArrayMessage::empty(MessageKind::String, false);
        strings.push(Message::from("a")).unwrap();
        assert_eq!(strings.value(0), Some(ValueMessage::from("a")));
    }

    #[test]
    fn test_push_fixed_length_fails() {
        let mut array =
            ArrayMessage::new(MessageKind::UInt8, true, ArrayItems::UInt8(vec![0; 2])).unwrap();
        assert!(array.push(Message::from(1u8)).is_err());
        assert_eq!(array.len(), 2);
        assert!(array.is_fixed_length());
    }

    #[test]
    fn test_slice_getter_kind_mismatch() {
        let array = ArrayMessage::empty(MessageKind::Time, false);
        assert_eq!(array.as_time_slice(), Some(&[][..]));
        assert_eq!(array.as_u8_slice(), None);
        assert_eq!(array.messages(), None);
    }
}
