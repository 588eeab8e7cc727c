// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parser implementations.

pub mod msg_parser;

pub use msg_parser::{ConstantDecl, FieldDecl, TypeDecl};
