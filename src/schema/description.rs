// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message descriptions as advertised in ROS1 connection headers.

use md5::{Digest, Md5};
use serde::Serialize;

/// Line placed before every dependency block of a full definition.
pub const DEFINITION_SEPARATOR: &str =
    "================================================================================";

/// Type name, checksum and full definition of a message type.
///
/// Built by [`MsgSchemaProvider::describe`](super::MsgSchemaProvider::describe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDescription {
    /// Fully-qualified type name (e.g. "geometry_msgs/PoseStamped")
    pub datatype: String,
    /// Hex MD5 of the canonical definition text
    pub md5: String,
    /// Definition text followed by every dependency block
    pub definition: String,
}

/// Hex MD5 digest of `text`.
pub fn md5_hex(text: &str) -> String {
    let mut h = Md5::new();
    h.update(text.as_bytes());
    hex::encode(h.finalize())
}

/// Join a root block and its dependency blocks into one definition.
///
/// Every block ends with a blank line before the next separator, matching
/// the definitions embedded in recordings.
pub fn full_definition<'a>(
    root_text: &str,
    dependencies: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut out = String::from(root_text);
    for (type_name, text) in dependencies {
        out.push_str("\n\n");
        out.push_str(DEFINITION_SEPARATOR);
        out.push_str("\nMSG: ");
        out.push_str(type_name);
        out.push('\n');
        out.push_str(text);
    }
    out
}
