// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message kinds and the temporal value types.
//!
//! [`MessageKind`] is the closed tag shared by schemas and message nodes:
//! fourteen primitive kinds plus the two structural kinds `Compound` and
//! `Array`, which never appear as leaf values.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{CodecError, Result};

/// Nanoseconds per second for time/duration conversion.
const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Kind tag for schemas and message nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Boolean, one byte on the wire
    Bool,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// Length-prefixed string
    String,
    /// Time (secs: uint32, nsecs: uint32)
    Time,
    /// Duration (secs: int32, nsecs: int32)
    Duration,
    /// Ordered set of named fields
    Compound,
    /// Sequence of same-kind elements
    Array,
}

impl MessageKind {
    /// All primitive kinds, in declaration order.
    pub const PRIMITIVES: [MessageKind; 14] = [
        MessageKind::Bool,
        MessageKind::UInt8,
        MessageKind::UInt16,
        MessageKind::UInt32,
        MessageKind::UInt64,
        MessageKind::Int8,
        MessageKind::Int16,
        MessageKind::Int32,
        MessageKind::Int64,
        MessageKind::Float32,
        MessageKind::Float64,
        MessageKind::String,
        MessageKind::Time,
        MessageKind::Duration,
    ];

    /// Whether this kind holds a single leaf value.
    pub const fn is_primitive(self) -> bool {
        !matches!(self, MessageKind::Compound | MessageKind::Array)
    }

    /// Whether arrays of this kind are stored as a packed buffer.
    ///
    /// True for every kind with a fixed wire width; strings, compounds and
    /// arrays are stored as a sequence of child messages.
    pub const fn is_packed(self) -> bool {
        self.wire_size().is_some()
    }

    /// Wire width in bytes, if fixed.
    pub const fn wire_size(self) -> Option<usize> {
        match self {
            MessageKind::Bool | MessageKind::UInt8 | MessageKind::Int8 => Some(1),
            MessageKind::UInt16 | MessageKind::Int16 => Some(2),
            MessageKind::UInt32 | MessageKind::Int32 | MessageKind::Float32 => Some(4),
            MessageKind::UInt64 | MessageKind::Int64 | MessageKind::Float64 => Some(8),
            MessageKind::Time | MessageKind::Duration => Some(8),
            MessageKind::String | MessageKind::Compound | MessageKind::Array => None,
        }
    }

    /// Canonical ROS1 name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            MessageKind::Bool => "bool",
            MessageKind::UInt8 => "uint8",
            MessageKind::UInt16 => "uint16",
            MessageKind::UInt32 => "uint32",
            MessageKind::UInt64 => "uint64",
            MessageKind::Int8 => "int8",
            MessageKind::Int16 => "int16",
            MessageKind::Int32 => "int32",
            MessageKind::Int64 => "int64",
            MessageKind::Float32 => "float32",
            MessageKind::Float64 => "float64",
            MessageKind::String => "string",
            MessageKind::Time => "time",
            MessageKind::Duration => "duration",
            MessageKind::Compound => "compound",
            MessageKind::Array => "array",
        }
    }

    /// Parse a primitive kind from its ROS1 name.
    ///
    /// `byte` and `char` are the deprecated aliases for `int8` and `uint8`.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" => Some(MessageKind::Bool),
            "uint8" | "char" => Some(MessageKind::UInt8),
            "uint16" => Some(MessageKind::UInt16),
            "uint32" => Some(MessageKind::UInt32),
            "uint64" => Some(MessageKind::UInt64),
            "int8" | "byte" => Some(MessageKind::Int8),
            "int16" => Some(MessageKind::Int16),
            "int32" => Some(MessageKind::Int32),
            "int64" => Some(MessageKind::Int64),
            "float32" => Some(MessageKind::Float32),
            "float64" => Some(MessageKind::Float64),
            "string" => Some(MessageKind::String),
            "time" => Some(MessageKind::Time),
            "duration" => Some(MessageKind::Duration),
            _ => None,
        }
    }

    /// Parse a primitive kind, failing with `UnsupportedKind`.
    pub fn parse(s: &str) -> Result<Self> {
        Self::try_from_str(s).ok_or_else(|| CodecError::unsupported_kind(s))
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// ROS1 time: unsigned seconds and nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Time {
    /// Seconds since the Unix epoch
    pub secs: u32,
    /// Nanoseconds within the second
    pub nsecs: u32,
}

impl Time {
    /// Create a time from its two wire fields.
    pub const fn new(secs: u32, nsecs: u32) -> Self {
        Self { secs, nsecs }
    }

    /// Total nanoseconds since the epoch.
    pub fn to_nanos(self) -> i64 {
        self.secs as i64 * NANOS_PER_SEC + self.nsecs as i64
    }

    /// Convert to a UTC datetime, if representable.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.secs as i64, self.nsecs)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nsecs)
    }
}

/// ROS1 duration: signed seconds and nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Duration {
    /// Seconds (may be negative)
    pub secs: i32,
    /// Nanoseconds (may be negative)
    pub nsecs: i32,
}

impl Duration {
    /// Create a duration from its two wire fields.
    pub const fn new(secs: i32, nsecs: i32) -> Self {
        Self { secs, nsecs }
    }

    /// Total nanoseconds, negative for negative durations.
    pub fn to_nanos(self) -> i64 {
        self.secs as i64 * NANOS_PER_SEC + self.nsecs as i64
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.to_nanos();
        let sign = if nanos < 0 { "-" } else { "" };
        let abs = nanos.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:09}",
            abs / NANOS_PER_SEC as u64,
            abs % NANOS_PER_SEC as u64
        )
    }
}
