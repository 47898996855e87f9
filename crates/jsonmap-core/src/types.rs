//! Core types shared across the mapping engine
//!
//! The declared `type` of a field is validated for membership only. It never
//! coerces the resolved value and is kept as an extension point.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Declared target type of a mapped field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Boolean,
    String,
    Number,
    Date,
    Array,
    Object,
    ObjectId,
}

impl ValueType {
    /// Every member of the closed set, in declaration order
    pub const ALL: [ValueType; 7] = [
        ValueType::Boolean,
        ValueType::String,
        ValueType::Number,
        ValueType::Date,
        ValueType::Array,
        ValueType::Object,
        ValueType::ObjectId,
    ];

    /// Canonical name of the type, as written in data templates
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Boolean => "Boolean",
            ValueType::String => "String",
            ValueType::Number => "Number",
            ValueType::Date => "Date",
            ValueType::Array => "Array",
            ValueType::Object => "Object",
            ValueType::ObjectId => "ObjectId",
        }
    }

    /// Look up a type by its exact canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Whether a field of this type may carry a nested template
    pub fn allows_nested(&self) -> bool {
        matches!(self, ValueType::Array | ValueType::Object)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Runtime kind of a JSON value, used in error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
