// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Template command - print a default-initialized message.

use clap::Args;
use robomsg::{build_default, to_json};

use crate::common::{print_json, DefinitionArgs, Result};

/// Print the default value of a message type as JSON.
#[derive(Args, Clone, Debug)]
pub struct TemplateCmd {
    #[command(flatten)]
    pub definition: DefinitionArgs,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,
}

impl TemplateCmd {
    pub fn run(self) -> Result<()> {
        let schema = self.definition.load()?;
        let message = build_default(&schema)?;
        print_json(&to_json(&message), self.compact)
    }
}
