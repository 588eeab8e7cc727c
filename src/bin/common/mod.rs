// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::fs::File;
use std::io::Read as _;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::Args;
use robomsg::{DecodeOptions, MessageDescription, MsgSchemaProvider, Schema, SchemaProvider};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the stderr log subscriber; `RUST_LOG` overrides the default level.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Where a message type's definition comes from.
#[derive(Args, Clone, Debug)]
pub struct DefinitionArgs {
    /// Message definition file (.msg text, or a .json schema)
    #[arg(short, long, value_name = "FILE")]
    pub definition: PathBuf,

    /// Fully-qualified message type (e.g. geometry_msgs/PoseStamped)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub type_name: String,
}

impl DefinitionArgs {
    fn is_json(&self) -> bool {
        self.definition.extension().is_some_and(|ext| ext == "json")
    }

    fn provider(&self) -> Result<MsgSchemaProvider> {
        MsgSchemaProvider::from_file(&self.type_name, &self.definition)
            .with_context(|| format!("Failed to load definition '{}'", self.definition.display()))
    }

    /// Checksum and full text of the requested type; JSON schemas have none.
    pub fn describe(&self) -> Result<Option<Arc<MessageDescription>>> {
        if self.is_json() {
            return Ok(None);
        }
        let description = self
            .provider()?
            .describe(&self.type_name)
            .with_context(|| format!("Failed to describe type '{}'", self.type_name))?;
        Ok(Some(description))
    }

    /// Resolve the schema of the requested type.
    pub fn load(&self) -> Result<Arc<Schema>> {
        let path = &self.definition;
        if self.is_json() {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            let schema: Schema = serde_json::from_str(&text)
                .with_context(|| format!("Invalid schema JSON in '{}'", path.display()))?;
            schema
                .validate()
                .with_context(|| format!("Invalid schema JSON in '{}'", path.display()))?;
            return Ok(Arc::new(schema));
        }

        let schema = self
            .provider()?
            .schema(&self.type_name)
            .with_context(|| format!("Failed to resolve type '{}'", self.type_name))?;
        Ok(schema)
    }
}

/// Load decoder options from a TOML file, or use the defaults.
pub fn load_options(config: Option<&Path>) -> Result<DecodeOptions> {
    let Some(path) = config else {
        return Ok(DecodeOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config '{}'", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config '{}'", path.display()))
}

/// Message bytes read from a file, a hex string or stdin.
pub enum InputBytes {
    Mapped(memmap2::Mmap),
    Owned(Vec<u8>),
}

impl Deref for InputBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            InputBytes::Mapped(mmap) => mmap,
            InputBytes::Owned(bytes) => bytes,
        }
    }
}

/// Read input bytes. Files are memory-mapped; without a file or hex string
/// the bytes are read from stdin.
pub fn read_input(input: Option<&Path>, hex: Option<&str>) -> Result<InputBytes> {
    if let Some(text) = hex {
        return Ok(InputBytes::Owned(parse_hex(text)?));
    }
    let Some(path) = input else {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read stdin")?;
        return Ok(InputBytes::Owned(bytes));
    };

    let file =
        File::open(path).with_context(|| format!("Failed to open file '{}'", path.display()))?;
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(InputBytes::Owned(Vec::new()));
    }
    // The map is read-only and dropped before the command returns.
    let mmap = unsafe { memmap2::Mmap::map(&file) }
        .with_context(|| format!("Failed to mmap file '{}'", path.display()))?;
    Ok(InputBytes::Mapped(mmap))
}

/// Parse hex text, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: String = text.split_whitespace().collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits.as_str());
    hex::decode(digits).with_context(|| format!("Invalid hex input: {text}"))
}

/// Print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{text}");
    Ok(())
}
