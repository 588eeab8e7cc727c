// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message schemas and their sources.
//!
//! - [`ast`] - the [`Schema`] tree consumed by the decoder
//! - [`parser`] - ROS1 `.msg` definition parsing
//! - [`provider`] - type name to schema resolution
//! - [`description`] - datatype, MD5 and full definition of a type
//! - [`builtin_types`] - std_msgs types available without a definition

pub mod ast;
pub mod builtin_types;
pub mod description;
pub mod parser;
pub mod provider;

pub use ast::{ArraySchema, CompoundSchema, Schema, SchemaField};
pub use description::MessageDescription;
pub use parser::msg_parser;
pub use provider::MsgSchemaProvider;
