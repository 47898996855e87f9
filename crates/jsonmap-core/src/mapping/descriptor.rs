//! Descriptor normalization
//!
//! Turns a raw [`FieldSpec`] into a canonical [`Descriptor`]. Property keys are
//! matched case-insensitively against a closed set, once, here; nothing past
//! this boundary looks at raw keys again.
//!
//! Copyright (c) 2025 Jsonmap Team
//! Licensed under the Apache-2.0 license

use super::formatting::Formatter;
use super::path::{FieldPath, Segment};
use super::template::{FieldSpec, Property, Template};
use crate::types::{json_kind, ValueType};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while normalizing a field specification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// A property key outside the recognized set
    #[error("Invalid property {0}")]
    UnknownProperty(String),

    /// No `path` property
    #[error("Path can't null")]
    MissingPath,

    /// `path` present but not a string
    #[error("Invalid path: path is not a String")]
    PathNotString,

    /// `path` is the empty string
    #[error("Invalid path: path is empty")]
    EmptyPath,

    /// `type` outside the closed set; carries the offending runtime kind
    #[error("Invalid type {0}")]
    InvalidType(&'static str),

    #[error("Error formatting is not a function")]
    FormattingNotFunction,

    #[error("Error nested is not a object")]
    NestedNotObject,

    #[error("Error required is not a boolean")]
    RequiredNotBoolean,

    /// A function or template given as `defaultValue`
    #[error("Error defaultValue is not a value")]
    DefaultNotValue,

    #[error("Type must be an Array or an Object when nested property is filled")]
    NestedTypeMismatch,

    /// A data-only template document that is not a mapping
    #[error("Invalid template: template must be an object")]
    TemplateNotObject,
}

/// Recognized field specification keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKey {
    Path,
    Type,
    Formatting,
    Nested,
    Required,
    DefaultValue,
}

impl DescriptorKey {
    /// Match a raw key, ignoring case
    pub fn parse(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "path" => Some(DescriptorKey::Path),
            "type" => Some(DescriptorKey::Type),
            "formatting" => Some(DescriptorKey::Formatting),
            "nested" => Some(DescriptorKey::Nested),
            "required" => Some(DescriptorKey::Required),
            "defaultvalue" => Some(DescriptorKey::DefaultValue),
            _ => None,
        }
    }
}

/// Canonical, validated form of a field specification
///
/// Borrows functions, templates and defaults from the spec it came from.
#[derive(Debug, Clone)]
pub struct Descriptor<'t> {
    pub path: FieldPath,
    /// Declared type; validated but never used to coerce
    pub value_type: Option<ValueType>,
    pub formatting: Option<&'t Formatter>,
    pub nested: Option<&'t Template>,
    pub required: bool,
    pub default_value: Option<&'t Value>,
}

impl<'t> Descriptor<'t> {
    /// Same settings over a reduced path
    pub fn with_segments(&self, segments: &[Segment]) -> Self {
        Self {
            path: self.path.reduced(segments),
            ..self.clone()
        }
    }
}

/// Normalize a raw field specification
pub fn normalize(spec: &FieldSpec) -> Result<Descriptor<'_>, SpecError> {
    let properties = match spec {
        FieldSpec::Path(path) => {
            return Ok(Descriptor {
                path: FieldPath::parse(path)?,
                value_type: None,
                formatting: None,
                nested: None,
                required: true,
                default_value: None,
            });
        }
        FieldSpec::Properties(properties) => properties,
    };

    let mut path = None;
    let mut value_type = None;
    let mut formatting = None;
    let mut nested = None;
    let mut required = true;
    let mut default_value = None;

    for (key, property) in properties {
        let key = DescriptorKey::parse(key)
            .ok_or_else(|| SpecError::UnknownProperty(key.clone()))?;

        match key {
            DescriptorKey::Path => match property {
                Property::Json(Value::String(text)) => path = Some(text.as_str()),
                _ => return Err(SpecError::PathNotString),
            },
            DescriptorKey::Type => value_type = normalize_type(property)?,
            DescriptorKey::Formatting => {
                formatting = match property {
                    Property::Formatting(formatter) => Some(formatter),
                    Property::Json(Value::Null) => None,
                    _ => return Err(SpecError::FormattingNotFunction),
                }
            }
            DescriptorKey::Nested => {
                nested = match property {
                    Property::Nested(template) => Some(template),
                    Property::Json(Value::Null) => None,
                    _ => return Err(SpecError::NestedNotObject),
                }
            }
            DescriptorKey::Required => {
                required = match property {
                    Property::Json(Value::Bool(flag)) => *flag,
                    Property::Json(Value::Null) => true,
                    _ => return Err(SpecError::RequiredNotBoolean),
                }
            }
            DescriptorKey::DefaultValue => {
                default_value = match property {
                    Property::Json(value) => Some(value),
                    _ => return Err(SpecError::DefaultNotValue),
                }
            }
        }
    }

    let path = FieldPath::parse(path.ok_or(SpecError::MissingPath)?)?;

    if let (Some(value_type), Some(_)) = (value_type, nested) {
        if !value_type.allows_nested() {
            return Err(SpecError::NestedTypeMismatch);
        }
    }

    Ok(Descriptor {
        path,
        value_type,
        formatting,
        nested,
        required,
        default_value,
    })
}

fn normalize_type(property: &Property) -> Result<Option<ValueType>, SpecError> {
    match property {
        Property::Type(value_type) => Ok(Some(*value_type)),
        Property::Json(Value::Null) => Ok(None),
        Property::Json(Value::String(name)) => ValueType::from_name(name)
            .map(Some)
            .ok_or(SpecError::InvalidType("string")),
        Property::Json(other) => Err(SpecError::InvalidType(json_kind(other))),
        Property::Formatting(_) => Err(SpecError::InvalidType("function")),
        Property::Nested(_) => Err(SpecError::InvalidType("object")),
    }
}
