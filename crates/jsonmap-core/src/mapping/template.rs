//! Templates and field specifications
//!
//! A [`Template`] maps output field names to [`FieldSpec`]s. A field spec is
//! either a bare path string or a set of properties whose keys are matched
//! case-insensitively when the spec is normalized.
//!
//! Copyright (c) 2025 Jsonmap Team
//! Licensed under the Apache-2.0 license

use super::builder::FieldSpecBuilder;
use super::descriptor::{normalize, DescriptorKey, SpecError};
use super::formatting::Formatter;
use crate::types::ValueType;
use serde_json::Value;

/// Value attached to a field specification property
#[derive(Debug, Clone)]
pub enum Property {
    /// Raw JSON value (path strings, `required` flags, defaults, data-only types)
    Json(Value),
    /// Declared target type
    Type(ValueType),
    /// Formatting function
    Formatting(Formatter),
    /// Nested template
    Nested(Template),
}

impl From<Value> for Property {
    fn from(value: Value) -> Self {
        Property::Json(value)
    }
}

impl From<ValueType> for Property {
    fn from(value_type: ValueType) -> Self {
        Property::Type(value_type)
    }
}

impl From<Formatter> for Property {
    fn from(formatter: Formatter) -> Self {
        Property::Formatting(formatter)
    }
}

impl From<Template> for Property {
    fn from(template: Template) -> Self {
        Property::Nested(template)
    }
}

/// Raw, not yet validated, specification of one output field
#[derive(Debug, Clone)]
pub enum FieldSpec {
    /// Shorthand for `{path: <string>}`
    Path(String),
    /// Property keys as written by the caller, with their values
    Properties(Vec<(String, Property)>),
}

impl FieldSpec {
    /// Start building a property-style spec for `path`
    pub fn builder(path: impl Into<String>) -> FieldSpecBuilder {
        FieldSpecBuilder::new(path)
    }

    /// Build a property-style spec from raw key/value pairs
    pub fn properties<K, P, I>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<Property>,
    {
        FieldSpec::Properties(
            properties
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Load a field spec from a data-only (JSON/YAML) template document
    pub fn from_json(value: &Value) -> Result<Self, SpecError> {
        match value {
            Value::String(path) => Ok(FieldSpec::Path(path.clone())),
            Value::Object(object) => {
                let mut properties = Vec::with_capacity(object.len());
                for (key, value) in object {
                    let property = match (DescriptorKey::parse(key), value) {
                        (Some(DescriptorKey::Nested), Value::Object(_)) => {
                            Property::Nested(Template::from_json(value)?)
                        }
                        _ => Property::Json(value.clone()),
                    };
                    properties.push((key.clone(), property));
                }
                Ok(FieldSpec::Properties(properties))
            }
            _ => Err(SpecError::MissingPath),
        }
    }
}

impl From<&str> for FieldSpec {
    fn from(path: &str) -> Self {
        FieldSpec::Path(path.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(path: String) -> Self {
        FieldSpec::Path(path)
    }
}

impl From<FieldSpecBuilder> for FieldSpec {
    fn from(builder: FieldSpecBuilder) -> Self {
        builder.build()
    }
}

/// Mapping from output field name to field specification
///
/// Declaration order is preserved and becomes the key order of output
/// records. Inserting an existing name replaces its spec in place.
#[derive(Debug, Clone, Default)]
pub struct Template {
    fields: Vec<(String, FieldSpec)>,
}

impl Template {
    /// Create an empty template
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.insert(name, spec);
        self
    }

    /// Add or replace a field
    pub fn insert(&mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) {
        let name = name.into();
        let spec = spec.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = spec,
            None => self.fields.push((name, spec)),
        }
    }

    /// Look up the spec of a field
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, spec)| spec)
    }

    /// Iterate fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Load a template from a data-only (JSON/YAML) document
    pub fn from_json(value: &Value) -> Result<Self, SpecError> {
        let object = value.as_object().ok_or(SpecError::TemplateNotObject)?;
        let mut template = Template::new();
        for (name, spec) in object {
            template.insert(name.clone(), FieldSpec::from_json(spec)?);
        }
        Ok(template)
    }

    /// Normalize every field spec, nested templates included
    ///
    /// Returns the first specification error without touching any source.
    pub fn validate(&self) -> Result<(), SpecError> {
        for (_, spec) in self.iter() {
            let descriptor = normalize(spec)?;
            if let Some(nested) = descriptor.nested {
                nested.validate()?;
            }
        }
        Ok(())
    }
}

impl<N, S> FromIterator<(N, S)> for Template
where
    N: Into<String>,
    S: Into<FieldSpec>,
{
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        let mut template = Template::new();
        for (name, spec) in iter {
            template.insert(name, spec);
        }
        template
    }
}
