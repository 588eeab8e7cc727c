// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for robomsg.
//!
//! Every failure in the decode, default-construction and encode paths is
//! reported through [`CodecError`]. Errors are raised at the first violation
//! and propagated unchanged through the recursive calls, so a caller either
//! receives a complete message tree or an error, never a partial tree.

use thiserror::Error;

use super::value::MessageKind;

/// Errors that can occur while decoding, building or encoding messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// A compound or array kind was passed where a primitive was required.
    #[error("Invalid scalar kind: '{kind}' is not a value message type")]
    InvalidScalarKind {
        /// The offending kind
        kind: MessageKind,
    },

    /// A kind name outside the known enumeration.
    #[error("Unsupported kind: '{kind}'")]
    UnsupportedKind {
        /// The kind name that was not recognized
        kind: String,
    },

    /// Fewer bytes remain than a field, length prefix or element needs.
    #[error(
        "Buffer too short: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
    )]
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        cursor_pos: u64,
    },

    /// Array length prefix exceeded the configured maximum.
    #[error("Length {length} exceeds maximum at position {position} (limit: {limit})")]
    LengthExceeded {
        /// Length that was read
        length: usize,
        /// Position in buffer
        position: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Bytes left over after an exact decode.
    #[error("{remaining} trailing bytes after message of {consumed} bytes")]
    TrailingBytes {
        /// Bytes consumed by the message
        consumed: usize,
        /// Bytes that were not consumed
        remaining: usize,
    },

    /// Invalid schema shape
    #[error("Invalid schema '{schema_name}': {reason}")]
    InvalidSchema {
        /// Schema name or identifier
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// Type not found by the schema provider
    #[error("Type not found: '{type_name}'")]
    TypeNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// Parse error in a message definition
    #[error("Parse error in {context}: {message}")]
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Message tree does not match the schema it is encoded with
    #[error("{codec} encode error: {message}")]
    EncodeError {
        /// Codec context
        codec: String,
        /// Error message
        message: String,
    },

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl CodecError {
    /// Create an invalid scalar kind error.
    pub fn invalid_scalar_kind(kind: MessageKind) -> Self {
        CodecError::InvalidScalarKind { kind }
    }

    /// Create an unsupported kind error.
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        CodecError::UnsupportedKind { kind: kind.into() }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, cursor_pos: u64) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create a length exceeded error.
    pub fn length_exceeded(length: usize, position: usize, limit: usize) -> Self {
        CodecError::LengthExceeded {
            length,
            position,
            limit,
        }
    }

    /// Create a trailing bytes error.
    pub fn trailing_bytes(consumed: usize, remaining: usize) -> Self {
        CodecError::TrailingBytes {
            consumed,
            remaining,
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        CodecError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::EncodeError {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Whether this error reports a truncated buffer.
    pub fn is_truncation(&self) -> bool {
        matches!(self, CodecError::BufferTooShort { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::InvalidScalarKind { kind } => vec![("kind", kind.to_string())],
            CodecError::UnsupportedKind { kind } => vec![("kind", kind.clone())],
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::LengthExceeded {
                length,
                position,
                limit,
            } => vec![
                ("length", length.to_string()),
                ("position", position.to_string()),
                ("limit", limit.to_string()),
            ],
            CodecError::TrailingBytes {
                consumed,
                remaining,
            } => vec![
                ("consumed", consumed.to_string()),
                ("remaining", remaining.to_string()),
            ],
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            CodecError::TypeNotFound { type_name } => vec![("type", type_name.clone())],
            CodecError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::EncodeError { codec, message } => {
                vec![("codec", codec.clone()), ("message", message.clone())]
            }
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Other(format!("IO: {err}"))
    }
}

/// Result type for robomsg operations.
pub type Result<T> = std::result::Result<T, CodecError>;
