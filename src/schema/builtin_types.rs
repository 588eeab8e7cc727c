// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Predefined ROS1 std_msgs types.
//!
//! Recordings normally embed every dependency of a message, but hand-written
//! definitions often reference these without including them.
//!
//! ## Supported Types
//!
//! - `std_msgs/Header` - sequence number, time stamp and frame id
//! - `std_msgs/Time`, `std_msgs/Duration` - single wrapped value
//! - `std_msgs/Empty` - no fields

/// ROS1 standard message header.
pub const STD_MSGS_HEADER: &str = "\
uint32 seq
time stamp
string frame_id
";

const BUILTINS: &[(&str, &str)] = &[
    ("std_msgs/Header", STD_MSGS_HEADER),
    ("std_msgs/Time", "time data\n"),
    ("std_msgs/Duration", "duration data\n"),
    ("std_msgs/Empty", ""),
];

/// Definition text of a builtin type, if `type_name` is one.
pub fn get(type_name: &str) -> Option<&'static str> {
    BUILTINS
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, definition)| *definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parser::msg_parser;

    #[test]
    fn test_builtin_header_structure() {
        let types = msg_parser::parse("std_msgs/Header", get("std_msgs/Header").unwrap()).unwrap();
        let names: Vec<_> = types[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["seq", "stamp", "frame_id"]);
    }

    #[test]
    fn test_all_builtins_parse() {
        for (name, definition) in BUILTINS {
            assert_eq!(get(name), Some(*definition));
            assert!(msg_parser::parse(name, definition).is_ok(), "{name}");
        }
        assert_eq!(get("geometry_msgs/Point"), None);
    }
}
