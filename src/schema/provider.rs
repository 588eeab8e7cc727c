// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema provider backed by ROS1 .msg definition text.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{CodecError, MessageKind, Result, SchemaProvider, TypeRegistry};

use super::ast::Schema;
use super::builtin_types;
use super::description::{full_definition, md5_hex, MessageDescription};
use super::parser::msg_parser::{self, TypeDecl};

/// Resolves type names to schemas from parsed .msg definitions.
///
/// Definitions are parsed once up front; schema trees and descriptions are
/// built on first request and cached, so repeated lookups share one `Arc`.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use robomsg::{MsgSchemaProvider, SchemaProvider};
///
/// let provider = MsgSchemaProvider::parse("geometry_msgs/Point", "float64 x\nfloat64 y\nfloat64 z")?;
/// let schema = provider.schema("geometry_msgs/Point")?;
/// assert_eq!(schema.fixed_wire_size(), Some(24));
/// # Ok(())
/// # }
/// ```
pub struct MsgSchemaProvider {
    root: String,
    types: HashMap<String, TypeDecl>,
    cache: TypeRegistry<Arc<Schema>>,
    descriptions: TypeRegistry<Arc<MessageDescription>>,
}

impl MsgSchemaProvider {
    /// Parse a full definition whose root block describes `root_type`.
    pub fn parse(root_type: &str, definition: &str) -> Result<Self> {
        let mut provider = Self {
            root: root_type.to_string(),
            types: HashMap::new(),
            cache: TypeRegistry::new(),
            descriptions: TypeRegistry::new(),
        };
        provider.add_definition(root_type, definition)?;
        Ok(provider)
    }

    /// Read and parse a definition file.
    pub fn from_file(root_type: &str, path: impl AsRef<Path>) -> Result<Self> {
        let definition = std::fs::read_to_string(path.as_ref())?;
        Self::parse(root_type, &definition)
    }

    /// Add the types declared in another definition.
    ///
    /// Later declarations of a type name replace earlier ones.
    pub fn add_definition(&mut self, type_name: &str, definition: &str) -> Result<()> {
        for decl in msg_parser::parse(type_name, definition)? {
            self.types.insert(decl.name.clone(), decl);
        }
        self.cache = TypeRegistry::new();
        self.descriptions = TypeRegistry::new();
        Ok(())
    }

    /// Type name of the root definition.
    pub fn root_type(&self) -> &str {
        &self.root
    }

    /// Schema of the root type.
    pub fn root_schema(&self) -> Result<Arc<Schema>> {
        self.schema(&self.root)
    }

    /// Description of the root type.
    pub fn root_description(&self) -> Result<Arc<MessageDescription>> {
        self.describe(&self.root)
    }

    /// Datatype, ROS1 MD5 checksum and full definition text of a type.
    ///
    /// The checksum covers constants and fields; nested types contribute
    /// their own checksum in place of their name. Dependencies are appended
    /// to the definition in first-use order.
    pub fn describe(&self, type_name: &str) -> Result<Arc<MessageDescription>> {
        let type_name = self.qualify(type_name, "");
        if let Some(description) = self.descriptions.get(&type_name)? {
            return Ok(description);
        }

        let md5 = self.checksum(&type_name, &mut Vec::new())?;
        let mut dependencies = Vec::new();
        self.collect_dependencies(&type_name, &mut dependencies)?;
        let blocks = dependencies
            .iter()
            .map(|name| Ok((name.as_str(), self.decl_of(name)?.text)))
            .collect::<Result<Vec<_>>>()?;
        let root = self.decl_of(&type_name)?;
        let definition = full_definition(
            &root.text,
            blocks.iter().map(|(name, text)| (*name, text.as_str())),
        );

        debug!(type_name = type_name.as_str(), md5 = md5.as_str(), "described type");
        let description = Arc::new(MessageDescription {
            datatype: type_name.clone(),
            md5,
            definition,
        });
        self.descriptions
            .register(type_name, Arc::clone(&description))?;
        Ok(description)
    }

    /// Declared type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn is_known(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name) || builtin_types::get(type_name).is_some()
    }

    /// Full name of a type reference made inside `package`.
    fn qualify(&self, raw: &str, package: &str) -> String {
        if raw == "Header" {
            return "std_msgs/Header".to_string();
        }
        if raw.contains('/') || package.is_empty() {
            return raw.to_string();
        }
        let qualified = format!("{package}/{raw}");
        if !self.is_known(&qualified) && self.is_known(raw) {
            return raw.to_string();
        }
        qualified
    }

    fn decl_of(&self, type_name: &str) -> Result<TypeDecl> {
        if let Some(decl) = self.types.get(type_name) {
            return Ok(decl.clone());
        }
        let definition =
            builtin_types::get(type_name).ok_or_else(|| CodecError::type_not_found(type_name))?;
        warn!(type_name, "definition not supplied, using builtin");
        msg_parser::parse(type_name, definition)?
            .into_iter()
            .next()
            .ok_or_else(|| CodecError::type_not_found(type_name))
    }

    fn resolve(&self, type_name: &str, stack: &mut Vec<String>) -> Result<Schema> {
        if let Some(schema) = self.cache.get(type_name)? {
            return Ok(Schema::clone(&schema));
        }
        check_recursion(type_name, stack)?;

        let decls = self.decl_of(type_name)?.fields;
        let package = package_of(type_name);

        stack.push(type_name.to_string());
        let mut fields = Vec::with_capacity(decls.len());
        for decl in decls {
            let element = match MessageKind::try_from_str(&decl.type_name) {
                Some(kind) => Schema::Scalar(kind),
                None => {
                    let nested = self.qualify(&decl.type_name, package);
                    self.resolve(&nested, stack)?
                }
            };
            let schema = match decl.array {
                None => element,
                Some(length) => Schema::array(element, length),
            };
            fields.push((decl.name, schema));
        }
        stack.pop();

        let schema = Schema::try_compound(type_name, fields)?;
        self.cache
            .register(type_name, Arc::new(schema.clone()))?;
        Ok(schema)
    }

    /// ROS1 MD5 of `type_name`: constants as `type NAME=value`, builtin
    /// fields as written, nested fields as `<nested md5> name`.
    fn checksum(&self, type_name: &str, stack: &mut Vec<String>) -> Result<String> {
        check_recursion(type_name, stack)?;
        let decl = self.decl_of(type_name)?;
        let package = package_of(type_name);

        stack.push(type_name.to_string());
        let mut lines = Vec::with_capacity(decl.constants.len() + decl.fields.len());
        for constant in &decl.constants {
            lines.push(format!(
                "{} {}={}",
                constant.type_name, constant.name, constant.value
            ));
        }
        for field in &decl.fields {
            if MessageKind::try_from_str(&field.type_name).is_some() {
                let suffix = match field.array {
                    None => String::new(),
                    Some(None) => "[]".to_string(),
                    Some(Some(n)) => format!("[{n}]"),
                };
                lines.push(format!("{}{suffix} {}", field.type_name, field.name));
            } else {
                let nested = self.qualify(&field.type_name, package);
                lines.push(format!("{} {}", self.checksum(&nested, stack)?, field.name));
            }
        }
        stack.pop();

        Ok(md5_hex(&lines.join("\n")))
    }

    /// Nested types used by `type_name`, depth first in first-use order.
    fn collect_dependencies(&self, type_name: &str, out: &mut Vec<String>) -> Result<()> {
        let decl = self.decl_of(type_name)?;
        let package = package_of(type_name);
        for field in &decl.fields {
            if MessageKind::try_from_str(&field.type_name).is_some() {
                continue;
            }
            let nested = self.qualify(&field.type_name, package);
            if nested != type_name && !out.contains(&nested) {
                out.push(nested.clone());
                self.collect_dependencies(&nested, out)?;
            }
        }
        Ok(())
    }
}

fn package_of(type_name: &str) -> &str {
    type_name.rsplit_once('/').map_or("", |(pkg, _)| pkg)
}

fn check_recursion(type_name: &str, stack: &[String]) -> Result<()> {
    if stack.iter().any(|t| t == type_name) {
        return Err(CodecError::invalid_schema(
            type_name,
            format!(
                "recursive type definition: {} -> {type_name}",
                stack.join(" -> ")
            ),
        ));
    }
    Ok(())
}

impl SchemaProvider for MsgSchemaProvider {
    fn schema(&self, type_name: &str) -> Result<Arc<Schema>> {
        let type_name = self.qualify(type_name, "");
        if let Some(schema) = self.cache.get(&type_name)? {
            return Ok(schema);
        }
        let schema = self.resolve(&type_name, &mut Vec::new())?;
        debug!(
            type_name = type_name.as_str(),
            fixed_size = ?schema.fixed_wire_size(),
            "resolved schema"
        );
        self.cache.get(&type_name)?.map_or_else(|| Ok(Arc::new(schema)), Ok)
    }
}
