// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout robomsg.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error taxonomy shared by every operation
//! - [`MessageKind`] - Closed kind tag for schemas and message nodes
//! - [`Time`] / [`Duration`] - ROS1 temporal values
//! - [`SchemaProvider`] / [`TypeRegistry`] - Schema lookup

pub mod error;
pub mod registry;
pub mod value;

pub use error::{CodecError, Result};
pub use registry::{SchemaProvider, TypeRegistry};
pub use value::{Duration, MessageKind, Time};
