// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - turn wire bytes into JSON.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use robomsg::{to_json, MessageDecoder};

use crate::common::{load_options, print_json, read_input, DefinitionArgs, Result};

/// Decode one message, or a stream of concatenated messages.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    #[command(flatten)]
    pub definition: DefinitionArgs,

    /// File holding the serialized message (stdin if omitted)
    #[arg(short, long, value_name = "FILE", conflicts_with = "hex")]
    pub input: Option<PathBuf>,

    /// Serialized message as a hex string
    #[arg(long, value_name = "HEX")]
    pub hex: Option<String>,

    /// Input holds messages back to back; print one JSON line per message
    #[arg(long)]
    pub stream: bool,

    /// Decoder options (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,
}

impl DecodeCmd {
    pub fn run(self) -> Result<()> {
        let schema = self.definition.load()?;
        let options = load_options(self.config.as_deref())?;
        let data = read_input(self.input.as_deref(), self.hex.as_deref())?;
        let decoder = MessageDecoder::with_options(options);

        if !self.stream {
            let message = decoder
                .decode_exact(&schema, &data)
                .with_context(|| format!("Failed to decode {}", self.definition.type_name))?;
            return print_json(&to_json(&message), self.compact);
        }

        let mut stream = decoder.decode_stream(&schema, &data);
        let mut index = 0usize;
        loop {
            let offset = stream.position();
            let Some(result) = stream.next() else {
                break;
            };
            let (message, _) = result
                .with_context(|| format!("Failed to decode message {index} at byte {offset}"))?;
            print_json(&to_json(&message), true)?;
            index += 1;
        }
        tracing::debug!(messages = index, bytes = data.len(), "stream decoded");
        Ok(())
    }
}
