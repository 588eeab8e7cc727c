// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 wire encoding and decoding.
//!
//! - [`cursor`] - bounds-checked little-endian reader
//! - [`decoder`] - schema-driven tree decoder
//! - [`default`] - default tree builder
//! - [`encoder`] - tree serializer
//! - [`json`] - JSON rendering for inspection

pub mod cursor;
pub mod decoder;
pub mod default;
pub mod encoder;
pub mod json;

pub use cursor::WireCursor;
pub use decoder::{
    decode, decode_scalar, decode_with_limit, DecodeOptions, MessageDecoder, MessageStream,
    MAX_ARRAY_LENGTH,
};
pub use default::build_default;
pub use encoder::{encode, encode_into, serialized_size, WireEncoder};
pub use json::to_json;
