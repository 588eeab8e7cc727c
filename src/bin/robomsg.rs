// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robomsg CLI
//!
//! Decode and construct ROS1 messages from their definition text.
//!
//! ## Usage
//!
//! ```sh
//! # Decode one message from a file
//! robomsg decode -d PoseStamped.msg -t geometry_msgs/PoseStamped -i msg.bin
//!
//! # Decode hex input
//! robomsg decode -d Pair.msg -t test/Pair --hex 070a000000
//!
//! # Print a default message
//! robomsg template -d PoseStamped.msg -t geometry_msgs/PoseStamped
//!
//! # Show the resolved schema
//! robomsg schema -d PoseStamped.msg -t geometry_msgs/PoseStamped
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DecodeCmd, SchemaCmd, TemplateCmd};
use common::Result;

/// Robomsg - runtime ROS1 message toolkit
///
/// Message layouts come from .msg definition text, so no generated code is
/// needed for any type.
#[derive(Parser, Clone)]
#[command(name = "robomsg")]
#[command(about = "Decode and construct ROS1 messages from their definitions", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Decode serialized messages to JSON
    Decode(DecodeCmd),

    /// Print a default-initialized message as JSON
    Template(TemplateCmd),

    /// Show the resolved schema of a message type
    Schema(SchemaCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(cmd) => cmd.run(),
        Commands::Template(cmd) => cmd.run(),
        Commands::Schema(cmd) => cmd.run(),
    }
}

fn main() {
    common::init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
