// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar message nodes.

use std::fmt;

use crate::core::{CodecError, Duration, MessageKind, Result, Time};

/// A single primitive value.
///
/// One variant per primitive [`MessageKind`]; the value's kind is fixed by
/// the schema it was built from. Strings hold the raw wire bytes, which ROS1
/// does not require to be UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueMessage {
    Bool(bool),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(Vec<u8>),
    Time(Time),
    Duration(Duration),
}

impl ValueMessage {
    /// Zero value of a primitive kind.
    ///
    /// Fails with `InvalidScalarKind` for compound and array kinds.
    pub fn default_for(kind: MessageKind) -> Result<Self> {
        Ok(match kind {
            MessageKind::Bool => ValueMessage::Bool(false),
            MessageKind::UInt8 => ValueMessage::UInt8(0),
            MessageKind::UInt16 => ValueMessage::UInt16(0),
            MessageKind::UInt32 => ValueMessage::UInt32(0),
            MessageKind::UInt64 => ValueMessage::UInt64(0),
            MessageKind::Int8 => ValueMessage::Int8(0),
            MessageKind::Int16 => ValueMessage::Int16(0),
            MessageKind::Int32 => ValueMessage::Int32(0),
            MessageKind::Int64 => ValueMessage::Int64(0),
            MessageKind::Float32 => ValueMessage::Float32(0.0),
            MessageKind::Float64 => ValueMessage::Float64(0.0),
            MessageKind::String => ValueMessage::String(Vec::new()),
            MessageKind::Time => ValueMessage::Time(Time::default()),
            MessageKind::Duration => ValueMessage::Duration(Duration::default()),
            MessageKind::Compound | MessageKind::Array => {
                return Err(CodecError::invalid_scalar_kind(kind))
            }
        })
    }

    /// Kind of the held value.
    pub fn kind(&self) -> MessageKind {
        match self {
            ValueMessage::Bool(_) => MessageKind::Bool,
            ValueMessage::UInt8(_) => MessageKind::UInt8,
            ValueMessage::UInt16(_) => MessageKind::UInt16,
            ValueMessage::UInt32(_) => MessageKind::UInt32,
            ValueMessage::UInt64(_) => MessageKind::UInt64,
            ValueMessage::Int8(_) => MessageKind::Int8,
            ValueMessage::Int16(_) => MessageKind::Int16,
            ValueMessage::Int32(_) => MessageKind::Int32,
            ValueMessage::Int64(_) => MessageKind::Int64,
            ValueMessage::Float32(_) => MessageKind::Float32,
            ValueMessage::Float64(_) => MessageKind::Float64,
            ValueMessage::String(_) => MessageKind::String,
            ValueMessage::Time(_) => MessageKind::Time,
            ValueMessage::Duration(_) => MessageKind::Duration,
        }
    }

    /// Bytes this value occupies on the wire.
    pub fn wire_size(&self) -> usize {
        match self {
            ValueMessage::String(s) => 4 + s.len(),
            other => other.kind().wire_size().unwrap_or(0),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ValueMessage::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Widen any integer kind to i64, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ValueMessage::Int8(v) => Some(*v as i64),
            ValueMessage::Int16(v) => Some(*v as i64),
            ValueMessage::Int32(v) => Some(*v as i64),
            ValueMessage::Int64(v) => Some(*v),
            ValueMessage::UInt8(v) => Some(*v as i64),
            ValueMessage::UInt16(v) => Some(*v as i64),
            ValueMessage::UInt32(v) => Some(*v as i64),
            ValueMessage::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Widen any non-negative integer to u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ValueMessage::UInt8(v) => Some(*v as u64),
            ValueMessage::UInt16(v) => Some(*v as u64),
            ValueMessage::UInt32(v) => Some(*v as u64),
            ValueMessage::UInt64(v) => Some(*v),
            ValueMessage::Int8(v) => u64::try_from(*v).ok(),
            ValueMessage::Int16(v) => u64::try_from(*v).ok(),
            ValueMessage::Int32(v) => u64::try_from(*v).ok(),
            ValueMessage::Int64(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Any numeric kind as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ValueMessage::Float32(v) => Some(*v as f64),
            ValueMessage::Float64(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64).or_else(|| other.as_u64().map(|v| v as f64)),
        }
    }

    /// String payload, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Raw string payload.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ValueMessage::String(s) => Some(s.as_slice()),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<Time> {
        match self {
            ValueMessage::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            ValueMessage::Duration(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for ValueMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueMessage::Bool(v) => write!(f, "{v}"),
            ValueMessage::UInt8(v) => write!(f, "{v}"),
            ValueMessage::UInt16(v) => write!(f, "{v}"),
            ValueMessage::UInt32(v) => write!(f, "{v}"),
            ValueMessage::UInt64(v) => write!(f, "{v}"),
            ValueMessage::Int8(v) => write!(f, "{v}"),
            ValueMessage::Int16(v) => write!(f, "{v}"),
            ValueMessage::Int32(v) => write!(f, "{v}"),
            ValueMessage::Int64(v) => write!(f, "{v}"),
            ValueMessage::Float32(v) => write!(f, "{v}"),
            ValueMessage::Float64(v) => write!(f, "{v}"),
            ValueMessage::String(v) => write!(f, "\"{}\"", String::from_utf8_lossy(v)),
            ValueMessage::Time(v) => write!(f, "{v}"),
            ValueMessage::Duration(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ValueMessage {
                fn from(v: $ty) -> Self {
                    ValueMessage::$variant(v)
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    Time => Time,
    Duration => Duration,
}

impl From<String> for ValueMessage {
    fn from(v: String) -> Self {
        ValueMessage::String(v.into_bytes())
    }
}

impl From<&str> for ValueMessage {
    fn from(v: &str) -> Self {
        ValueMessage::String(v.as_bytes().to_vec())
    }
}
