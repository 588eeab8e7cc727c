// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON rendering of message trees.

use serde_json::{json, Map, Number, Value};

use crate::message::{ArrayItems, Message, ValueMessage};

/// Render a message tree as JSON.
///
/// Compounds become objects with fields in schema order, arrays become JSON
/// arrays, time and duration become `{"secs", "nsecs"}` objects. NaN and
/// infinite floats have no JSON number form and are rendered as strings.
pub fn to_json(message: &Message) -> Value {
    match message {
        Message::Value(value) => value_to_json(value),
        Message::Compound(compound) => {
            let mut map = Map::new();
            for (name, field) in compound.iter() {
                map.insert(name.to_string(), to_json(field));
            }
            Value::Object(map)
        }
        Message::Array(array) => match array.items() {
            ArrayItems::Bool(v) => Value::from(v.clone()),
            ArrayItems::UInt8(v) => Value::from(v.clone()),
            ArrayItems::UInt16(v) => Value::from(v.clone()),
            ArrayItems::UInt32(v) => Value::from(v.clone()),
            ArrayItems::UInt64(v) => Value::from(v.clone()),
            ArrayItems::Int8(v) => Value::from(v.clone()),
            ArrayItems::Int16(v) => Value::from(v.clone()),
            ArrayItems::Int32(v) => Value::from(v.clone()),
            ArrayItems::Int64(v) => Value::from(v.clone()),
            ArrayItems::Float32(v) => v.iter().map(|x| float_to_json(*x as f64)).collect(),
            ArrayItems::Float64(v) => v.iter().map(|x| float_to_json(*x)).collect(),
            ArrayItems::Time(v) => v
                .iter()
                .map(|t| json!({ "secs": t.secs, "nsecs": t.nsecs }))
                .collect(),
            ArrayItems::Duration(v) => v
                .iter()
                .map(|d| json!({ "secs": d.secs, "nsecs": d.nsecs }))
                .collect(),
            ArrayItems::Messages(v) => v.iter().map(to_json).collect(),
        },
    }
}

fn value_to_json(value: &ValueMessage) -> Value {
    match value {
        ValueMessage::Bool(v) => Value::Bool(*v),
        ValueMessage::UInt8(v) => Value::from(*v),
        ValueMessage::UInt16(v) => Value::from(*v),
        ValueMessage::UInt32(v) => Value::from(*v),
        ValueMessage::UInt64(v) => Value::from(*v),
        ValueMessage::Int8(v) => Value::from(*v),
        ValueMessage::Int16(v) => Value::from(*v),
        ValueMessage::Int32(v) => Value::from(*v),
        ValueMessage::Int64(v) => Value::from(*v),
        ValueMessage::Float32(v) => float_to_json(*v as f64),
        ValueMessage::Float64(v) => float_to_json(*v),
        ValueMessage::String(s) => Value::String(String::from_utf8_lossy(s).into_owned()),
        ValueMessage::Time(t) => json!({ "secs": t.secs, "nsecs": t.nsecs }),
        ValueMessage::Duration(d) => json!({ "secs": d.secs, "nsecs": d.nsecs }),
    }
}

fn float_to_json(v: f64) -> Value {
    match Number::from_f64(v) {
        Some(n) => Value::Number(n),
        None => Value::String(v.to_string()),
    }
}
