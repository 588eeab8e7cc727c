// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod decode;
mod schema;
mod template;

pub use decode::DecodeCmd;
pub use schema::SchemaCmd;
pub use template::TemplateCmd;
