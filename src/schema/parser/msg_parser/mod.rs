// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MSG format parser using Pest.
//!
//! This module handles parsing of ROS1 .msg definition text into flat type
//! declarations. Type references are kept as written; resolving them into a
//! [`Schema`](crate::schema::Schema) tree is done by
//! [`MsgSchemaProvider`](crate::schema::MsgSchemaProvider).
//!
//! The format supports:
//! - Simple field lists (root message)
//! - Dependency blocks with "MSG: TypeName" headers after `===` lines
//! - Array types: T[] (dynamic) or T[n] (fixed)
//! - Nested types: package/MessageName or MessageName
//! - Constants (`int32 LIMIT=10`), which carry no wire data but feed the
//!   message checksum
//! - Comments (# style)

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::core::{CodecError, Result};

/// Pest parser for ROS .msg schema files.
#[derive(Parser)]
#[grammar = "schema/parser/msg_parser/msg.pest"] // Path relative to src/ directory
pub struct MsgParser;

/// One declared field, with its type name unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name
    pub name: String,
    /// Type as written (e.g. "float64", "Header", "geometry_msgs/Point")
    pub type_name: String,
    /// `None` for a plain field, `Some(None)` for `T[]`, `Some(Some(n))` for `T[n]`
    pub array: Option<Option<usize>>,
}

/// One declared constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDecl {
    pub name: String,
    pub type_name: String,
    /// Value text; comments are stripped except from string constants
    pub value: String,
}

/// One message type: its name, constants and fields in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    /// Type name; the root block takes the name given to [`parse`]
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub constants: Vec<ConstantDecl>,
    /// Block text as written, without the `MSG:` header and trailing blanks
    pub text: String,
}

/// Parse a full definition: the root type followed by its dependencies.
///
/// The first returned declaration is always the root type.
pub fn parse(name: &str, definition: &str) -> Result<Vec<TypeDecl>> {
    let schema = MsgParser::parse(Rule::schema, definition)
        .map_err(|e| CodecError::parse(format!("msg definition of {name}"), format!("{e}")))?
        .next()
        .ok_or_else(|| CodecError::parse("msg definition", "empty parse result"))?;

    let mut types = Vec::new();
    // schema = SOI ~ root_msg ~ (separator ~ dependency_msg)* ~ EOI
    for item in schema.into_inner() {
        match item.as_rule() {
            Rule::root_msg => {
                let text = item.as_str().trim_end().to_string();
                let (fields, constants) = parse_body(item.into_inner())?;
                types.push(TypeDecl {
                    name: name.to_string(),
                    fields,
                    constants,
                    text,
                });
            }
            Rule::dependency_msg => {
                let block = item.as_str();
                let block_start = item.as_span().start();
                let mut inner = item.into_inner();
                // First item is the type name from "MSG: package/Type"
                let type_pair = inner
                    .next()
                    .ok_or_else(|| CodecError::parse("msg definition", "MSG: block without type"))?;
                let header_end = type_pair.as_span().end() - block_start;
                let text = block[header_end..]
                    .split_once('\n')
                    .map_or("", |(_, body)| body)
                    .trim_end()
                    .to_string();
                let (fields, constants) = parse_body(inner)?;
                types.push(TypeDecl {
                    name: type_pair.as_str().to_string(),
                    fields,
                    constants,
                    text,
                });
            }
            _ => {}
        }
    }
    Ok(types)
}

fn parse_body<'i>(
    items: impl Iterator<Item = Pair<'i, Rule>>,
) -> Result<(Vec<FieldDecl>, Vec<ConstantDecl>)> {
    let mut fields = Vec::new();
    let mut constants = Vec::new();
    for item in items {
        match item.as_rule() {
            Rule::field => fields.push(parse_field(item)?),
            Rule::constant => constants.push(parse_constant(item)?),
            _ => {}
        }
    }
    Ok((fields, constants))
}

/// Build a constant from `field_type ~ sp ~ field_name ~ "=" ~ constant_value`.
fn parse_constant(pair: Pair<'_, Rule>) -> Result<ConstantDecl> {
    let line = pair.as_str().to_string();
    let mut type_name = None;
    let mut name = None;
    let mut value = None;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::field_type => type_name = Some(part.as_str().to_string()),
            Rule::field_name => name = Some(part.as_str().to_string()),
            Rule::constant_value => value = Some(part.as_str()),
            _ => {}
        }
    }

    match (type_name, name, value) {
        (Some(type_name), Some(name), Some(value)) => {
            // '#' is part of a string constant's value.
            let value = if type_name == "string" {
                value.trim()
            } else {
                value.split('#').next().unwrap_or_default().trim()
            };
            Ok(ConstantDecl {
                name,
                type_name,
                value: value.to_string(),
            })
        }
        _ => Err(CodecError::parse("msg constant", format!("malformed constant '{line}'"))),
    }
}

/// Build a declaration from `field = { field_type ~ sp ~ field_name }`.
fn parse_field(pair: Pair<'_, Rule>) -> Result<FieldDecl> {
    let line = pair.as_str().to_string();
    let mut type_name = None;
    let mut array = None;
    let mut name = None;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::field_type => {
                for type_part in part.into_inner() {
                    match type_part.as_rule() {
                        Rule::type_name => type_name = Some(type_part.as_str().to_string()),
                        Rule::array_suffix => {
                            let bound = match type_part.into_inner().next() {
                                Some(bound) => Some(bound.as_str().parse::<usize>().map_err(
                                    |e| CodecError::parse(format!("array bound in '{line}'"), e.to_string()),
                                )?),
                                None => None,
                            };
                            array = Some(bound);
                        }
                        _ => {}
                    }
                }
            }
            Rule::field_name => name = Some(part.as_str().to_string()),
            _ => {}
        }
    }

    match (type_name, name) {
        (Some(type_name), Some(name)) => Ok(FieldDecl {
            name,
            type_name,
            array,
        }),
        _ => Err(CodecError::parse("msg field", format!("malformed field '{line}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, type_name: &str, array: Option<Option<usize>>) -> FieldDecl {
        FieldDecl {
            name: name.to_string(),
            type_name: type_name.to_string(),
            array,
        }
    }

    #[test]
    fn test_parse_simple() {
        let types = parse("geometry_msgs/Point", "float64 x\nfloat64 y\nfloat64 z\n").unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "geometry_msgs/Point");
        assert_eq!(
            types[0].fields,
            vec![
                field("x", "float64", None),
                field("y", "float64", None),
                field("z", "float64", None),
            ]
        );
    }

    #[test]
    fn test_parse_arrays() {
        let types = parse("test/Arrays", "uint8[] data\nfloat64[9] covariance").unwrap();
        assert_eq!(
            types[0].fields,
            vec![
                field("data", "uint8", Some(None)),
                field("covariance", "float64", Some(Some(9))),
            ]
        );
    }

    #[test]
    fn test_parse_comments_and_constants() {
        let text = "# leading comment\n\
                    byte DEBUG=1\n\
                    int32 LIMIT = -4 # a comment\n\
                    string NAME = hello # not a comment\n\
                    \n\
                    byte level   # trailing comment\n\
                    \tstring msg\n";
        let types = parse("rosgraph_msgs/Log", text).unwrap();
        assert_eq!(
            types[0].fields,
            vec![field("level", "byte", None), field("msg", "string", None)]
        );

        let constants: Vec<_> = types[0]
            .constants
            .iter()
            .map(|c| (c.type_name.as_str(), c.name.as_str(), c.value.as_str()))
            .collect();
        assert_eq!(
            constants,
            vec![
                ("byte", "DEBUG", "1"),
                ("int32", "LIMIT", "-4"),
                ("string", "NAME", "hello # not a comment"),
            ]
        );
    }

    #[test]
    fn test_block_text() {
        let text = "Header header # stamp\n\
                    \n\
                    ===\n\
                    MSG: std_msgs/Header\n\
                    uint32 seq\n\
                    time stamp\n\
                    \n";
        let types = parse("test/Stamped", text).unwrap();
        assert_eq!(types[0].text, "Header header # stamp");
        assert_eq!(types[1].text, "uint32 seq\ntime stamp");
    }

    #[test]
    fn test_parse_dependency_blocks() {
        let text = "Header header\n\
                    geometry_msgs/Point32[] points\n\
                    ================================================================================\n\
                    MSG: std_msgs/Header\n\
                    uint32 seq\n\
                    time stamp\n\
                    string frame_id\n\
                    \n\
                    ================================================================================\n\
                    MSG: geometry_msgs/Point32\n\
                    # comment inside a block\n\
                    float32 x\n\
                    float32 y\n\
                    float32 z";
        let types = parse("geometry_msgs/PolygonStamped", text).unwrap();
        let names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "geometry_msgs/PolygonStamped",
                "std_msgs/Header",
                "geometry_msgs/Point32",
            ]
        );
        assert_eq!(types[0].fields[1], field("points", "geometry_msgs/Point32", Some(None)));
        assert_eq!(types[1].fields.len(), 3);
        assert_eq!(types[2].fields.len(), 3);
    }

    #[test]
    fn test_parse_empty_message() {
        let types = parse("std_msgs/Empty", "").unwrap();
        assert_eq!(types.len(), 1);
        assert!(types[0].fields.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = parse("test/Bad", "float64\n").unwrap_err();
        assert!(matches!(err, CodecError::ParseError { .. }));

        let err = parse("test/Bad", "uint8[x] data\n").unwrap_err();
        assert!(matches!(err, CodecError::ParseError { .. }));
    }
}
