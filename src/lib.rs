// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robomsg
//!
//! Schema-driven decoding and construction of ROS1 wire-format messages whose
//! layout is only known at runtime.
//!
//! A [`Schema`] describes a message's shape: scalars, compounds of ordered
//! named fields, and fixed or variable length arrays. Given a schema and a
//! byte buffer, the decoder produces a typed [`Message`] tree and the exact
//! number of bytes consumed. Given only a schema, [`build_default`] produces
//! a tree of zero values ready to be filled in and [`encode`]d.
//!
//! ## Architecture
//!
//! - `core/` - kinds, time types, errors and the schema provider trait
//! - `schema/` - the schema tree and the ROS1 `.msg` definition parser
//! - `message/` - the typed value tree
//! - `encoding/` - decoder, default builder, encoder and JSON rendering
//!
//! ## Example: Decoding
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robomsg::{decode, MsgSchemaProvider, SchemaProvider};
//!
//! let provider = MsgSchemaProvider::parse("test/Pair", "uint8 a\nuint32 b")?;
//! let schema = provider.schema("test/Pair")?;
//!
//! let (message, consumed) = decode(&schema, &[0x07, 0x0A, 0x00, 0x00, 0x00])?;
//! assert_eq!(consumed, 5);
//! assert_eq!(message["a"].as_u64(), Some(7));
//! assert_eq!(message["b"].as_u64(), Some(10));
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Building and encoding
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robomsg::{build_default, encode, Message, MsgSchemaProvider, SchemaProvider};
//!
//! let provider = MsgSchemaProvider::parse("test/Stamped", "Header header\nfloat64 value")?;
//! let schema = provider.schema("test/Stamped")?;
//!
//! let mut message = build_default(&schema)?;
//! if let Some(fields) = message.as_compound_mut() {
//!     fields["value"] = Message::from(1.5f64);
//! }
//! let bytes = encode(&schema, &message)?;
//! assert_eq!(bytes.len(), 4 + 8 + 4 + 8);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, Duration, MessageKind, Result, SchemaProvider, Time, TypeRegistry};

// Encoding/decoding
pub mod encoding;

pub use encoding::{
    build_default, decode, decode_scalar, decode_with_limit, encode, encode_into,
    serialized_size, to_json, DecodeOptions, MessageDecoder, MessageStream,
};

// Typed value tree
pub mod message;

pub use message::{ArrayItems, ArrayMessage, CompoundMessage, Message, ValueMessage};

// Schema tree and providers
pub mod schema;

pub use schema::{
    ArraySchema, CompoundSchema, MessageDescription, MsgSchemaProvider, Schema, SchemaField,
};
