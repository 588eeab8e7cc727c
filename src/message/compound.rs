// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Compound message nodes.

use std::ops::{Index, IndexMut};

use super::Message;

/// Ordered mapping of field name to owned child message.
///
/// Insertion order is schema field order, which is also wire order. Lookups
/// are linear; message types rarely have more than a few dozen fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundMessage {
    datatype: String,
    fields: Vec<(String, Message)>,
}

impl CompoundMessage {
    /// Create an empty compound of the given type.
    pub fn new(datatype: impl Into<String>) -> Self {
        Self {
            datatype: datatype.into(),
            fields: Vec::new(),
        }
    }

    /// Create an empty compound with room for `capacity` fields.
    pub fn with_capacity(datatype: impl Into<String>, capacity: usize) -> Self {
        Self {
            datatype: datatype.into(),
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Type name this compound was built from.
    pub fn datatype(&self) -> &str {
        &self.datatype
    }

    /// Insert a field at the end, or replace an existing field in place.
    ///
    /// Returns the previous value when the name was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: Message) -> Option<Message> {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Message> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Message> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.fields.iter().map(|(n, m)| (n.as_str(), m))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Message)> {
        self.fields.iter_mut().map(|(n, m)| (n.as_str(), m))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Index<&str> for CompoundMessage {
    type Output = Message;

    fn index(&self, name: &str) -> &Message {
        match self.get(name) {
            Some(m) => m,
            None => panic!("no field '{name}' in {}", self.datatype),
        }
    }
}

impl IndexMut<&str> for CompoundMessage {
    fn index_mut(&mut self, name: &str) -> &mut Message {
        match self.fields.iter().position(|(n, _)| n == name) {
            Some(pos) => &mut self.fields[pos].1,
            None => panic!("no field '{name}' in {}", self.datatype),
        }
    }
}
