// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed value tree produced by decoding or default construction.
//!
//! A [`Message`] mirrors the shape of the schema it was built from:
//! - [`ValueMessage`] - one primitive value
//! - [`CompoundMessage`] - ordered named fields, each an owned child
//! - [`ArrayMessage`] - packed primitives or a sequence of owned children
//!
//! Every child is exclusively owned by its parent. A tree is created in full
//! by one call and dropped as a unit with its root.

pub mod array;
pub mod compound;
pub mod value;

use std::fmt;
use std::ops::Index;

pub use array::{ArrayItems, ArrayMessage};
pub use compound::CompoundMessage;
pub use value::ValueMessage;

use crate::core::{Duration, MessageKind, Time};

/// A node of the typed value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A primitive value
    Value(ValueMessage),
    /// Ordered named fields
    Compound(CompoundMessage),
    /// Sequence of same-kind elements
    Array(ArrayMessage),
}

impl Message {
    /// Kind tag of this node.
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Value(v) => v.kind(),
            Message::Compound(_) => MessageKind::Compound,
            Message::Array(_) => MessageKind::Array,
        }
    }

    pub fn as_value(&self) -> Option<&ValueMessage> {
        match self {
            Message::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_value_mut(&mut self) -> Option<&mut ValueMessage> {
        match self {
            Message::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&CompoundMessage> {
        match self {
            Message::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut CompoundMessage> {
        match self {
            Message::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayMessage> {
        match self {
            Message::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayMessage> {
        match self {
            Message::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(ValueMessage::as_bool)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_value().and_then(ValueMessage::as_i64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_value().and_then(ValueMessage::as_u64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(ValueMessage::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(ValueMessage::as_str)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.as_value().and_then(ValueMessage::as_bytes)
    }

    pub fn as_time(&self) -> Option<Time> {
        self.as_value().and_then(ValueMessage::as_time)
    }

    pub fn as_duration(&self) -> Option<Duration> {
        self.as_value().and_then(ValueMessage::as_duration)
    }

    /// Field `name` of a compound node.
    pub fn get(&self, name: &str) -> Option<&Message> {
        self.as_compound().and_then(|c| c.get(name))
    }

    /// Look up a node by dotted path, e.g. `"header.stamp"`.
    ///
    /// Numeric segments index into arrays of child messages (`"points.2.x"`).
    /// Packed array elements are not nodes and cannot be reached this way;
    /// use [`ArrayMessage::value`] on the array instead.
    pub fn get_path(&self, path: &str) -> Option<&Message> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| match node {
                Message::Compound(c) => c.get(segment),
                Message::Array(a) => segment.parse::<usize>().ok().and_then(|i| a.message(i)),
                Message::Value(_) => None,
            })
    }

    /// Bytes this tree occupies on the wire.
    pub fn wire_size(&self) -> usize {
        match self {
            Message::Value(v) => v.wire_size(),
            Message::Compound(c) => c.iter().map(|(_, m)| m.wire_size()).sum(),
            Message::Array(a) => {
                let prefix = if a.is_fixed_length() { 0 } else { 4 };
                let elements = match a.items() {
                    ArrayItems::Messages(items) => items.iter().map(Message::wire_size).sum(),
                    _ => a.len() * a.element_kind().wire_size().unwrap_or(0),
                };
                prefix + elements
            }
        }
    }
}

impl Index<&str> for Message {
    type Output = Message;

    /// Field lookup on a compound node; panics if absent or not a compound.
    fn index(&self, name: &str) -> &Message {
        match self {
            Message::Compound(c) => &c[name],
            other => panic!("cannot index {} message by '{name}'", other.kind()),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Value(v) => write!(f, "{v}"),
            Message::Compound(c) => write!(f, "{} {{{} fields}}", c.datatype(), c.len()),
            Message::Array(a) => write!(f, "{}[{} elements]", a.element_kind(), a.len()),
        }
    }
}

impl From<ValueMessage> for Message {
    fn from(v: ValueMessage) -> Self {
        Message::Value(v)
    }
}

impl From<CompoundMessage> for Message {
    fn from(c: CompoundMessage) -> Self {
        Message::Compound(c)
    }
}

impl From<ArrayMessage> for Message {
    fn from(a: ArrayMessage) -> Self {
        Message::Array(a)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Message {
                fn from(v: $ty) -> Self {
                    Message::Value(ValueMessage::from(v))
                }
            }
        )*
    };
}

impl_from_scalar!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, String, &str, Time, Duration);
