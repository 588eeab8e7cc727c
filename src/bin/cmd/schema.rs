// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - show the resolved layout of a message type.

use clap::Args;

use crate::common::{DefinitionArgs, Result};

/// Print the resolved schema tree, its wire size and its ROS1 checksum.
#[derive(Args, Clone, Debug)]
pub struct SchemaCmd {
    #[command(flatten)]
    pub definition: DefinitionArgs,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Print the full definition text with its dependencies instead
    #[arg(long, conflicts_with = "json")]
    pub full_text: bool,
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        if self.full_text {
            let Some(description) = self.definition.describe()? else {
                anyhow::bail!("JSON schemas carry no definition text");
            };
            println!("{}", description.definition);
            return Ok(());
        }

        let schema = self.definition.load()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&*schema)?);
            return Ok(());
        }

        print!("{schema}");
        match schema.fixed_wire_size() {
            Some(size) => println!("# fixed size: {size} bytes"),
            None => println!("# variable size"),
        }
        if let Some(description) = self.definition.describe()? {
            println!("# md5: {}", description.md5);
        }
        Ok(())
    }
}
