// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use robomsg::{MessageKind, MsgSchemaProvider, Schema, SchemaProvider, Time};

/// Path to a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Schema of `geometry_msgs/PoseStamped` from the recorded definition fixture.
pub fn pose_stamped_schema() -> Arc<Schema> {
    let provider = MsgSchemaProvider::from_file(
        "geometry_msgs/PoseStamped",
        fixture_path("pose_stamped.msg"),
    )
    .unwrap();
    provider.root_schema().unwrap()
}

/// `[a: uint8, b: uint32]`
pub fn pair_schema() -> Schema {
    Schema::compound(
        "test/Pair",
        [
            ("a", Schema::scalar(MessageKind::UInt8)),
            ("b", Schema::scalar(MessageKind::UInt32)),
        ],
    )
}

/// Little-endian wire bytes, written field by field.
#[derive(Default)]
pub struct Wire(pub Vec<u8>);

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.0.push(v);
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f64(mut self, v: f64) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn string(self, s: &str) -> Self {
        let mut wire = self.u32(s.len() as u32);
        wire.0.extend_from_slice(s.as_bytes());
        wire
    }

    pub fn time(self, t: Time) -> Self {
        self.u32(t.secs).u32(t.nsecs)
    }

    pub fn bytes(self) -> Vec<u8> {
        self.0
    }
}

/// Serialized PoseStamped with recognizable values.
pub fn pose_stamped_bytes() -> Vec<u8> {
    Wire::new()
        .u32(42)
        .time(Time::new(1_700_000_000, 500))
        .string("map")
        .f64(1.0)
        .f64(2.0)
        .f64(3.0)
        .f64(0.0)
        .f64(0.0)
        .f64(0.0)
        .f64(1.0)
        .bytes()
}
