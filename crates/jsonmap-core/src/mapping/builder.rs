//! Builder for property-style field specifications
//!
//! Copyright (c) 2025 Jsonmap Team
//! Licensed under the Apache-2.0 license

use super::formatting::Formatter;
use super::template::{FieldSpec, Property, Template};
use crate::types::ValueType;
use serde_json::Value;

/// Builder for creating field specifications
///
/// Produces the same [`FieldSpec::Properties`] a caller could write by hand,
/// so the result still goes through normal validation.
#[derive(Debug, Clone)]
pub struct FieldSpecBuilder {
    path: String,
    value_type: Option<ValueType>,
    formatting: Option<Formatter>,
    nested: Option<Template>,
    required: Option<bool>,
    default_value: Option<Value>,
}

impl FieldSpecBuilder {
    /// Create a new builder for the given dotted path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value_type: None,
            formatting: None,
            nested: None,
            required: None,
            default_value: None,
        }
    }

    /// Set the declared type
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Set the formatting function
    pub fn formatting(mut self, formatter: Formatter) -> Self {
        self.formatting = Some(formatter);
        self
    }

    /// Set the nested template
    pub fn nested(mut self, template: Template) -> Self {
        self.nested = Some(template);
        self
    }

    /// Set whether a missing path is an error
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Mark the field optional
    pub fn optional(self) -> Self {
        self.required(false)
    }

    /// Set the value used when the path is missing
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Build the field specification
    pub fn build(self) -> FieldSpec {
        let mut properties = vec![("path".to_string(), Property::Json(Value::String(self.path)))];
        if let Some(value_type) = self.value_type {
            properties.push(("type".to_string(), Property::Type(value_type)));
        }
        if let Some(formatter) = self.formatting {
            properties.push(("formatting".to_string(), Property::Formatting(formatter)));
        }
        if let Some(template) = self.nested {
            properties.push(("nested".to_string(), Property::Nested(template)));
        }
        if let Some(required) = self.required {
            properties.push(("required".to_string(), Property::Json(Value::Bool(required))));
        }
        if let Some(value) = self.default_value {
            properties.push(("defaultValue".to_string(), Property::Json(value)));
        }
        FieldSpec::Properties(properties)
    }
}
