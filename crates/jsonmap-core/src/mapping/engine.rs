//! Template engine
//!
//! Applies a [`Template`] to a source value. A sequence source yields one
//! record per element; anything else yields a single record. Field outcomes
//! are joined per record and records are joined per sequence, both
//! positionally.
//!
//! Copyright (c) 2025 Jsonmap Team
//! Licensed under the Apache-2.0 license

use super::evaluator::evaluate;
use super::outcome::Outcome;
use super::template::Template;
use crate::Result;
use serde_json::{Map, Value};
use tracing::debug;

/// Apply `template` to `source` at the top level
///
/// An absent or null source, an absent template, or a record that resolved to
/// nothing all produce an empty mapping. `root` defaults to `source` and is
/// what `$ROOT` paths restart from.
pub fn apply_template(
    source: Option<&Value>,
    template: Option<&Template>,
    root: Option<&Value>,
) -> Result<Outcome> {
    let (source, template) = match (source, template) {
        (Some(source), Some(template)) if !source.is_null() => (source, template),
        _ => return Ok(Outcome::Ready(Value::Object(Map::new()))),
    };
    let root = root.unwrap_or(source);
    debug!(fields = template.len(), sequence = source.is_array(), "applying template");

    Ok(build(source, template, root)?.or_value(Value::Object(Map::new())))
}

/// Apply a nested template to the value its parent field resolved to
///
/// Unlike the top level, a null source or an empty record is absent so the
/// parent field is omitted.
pub(crate) fn apply_nested(source: &Value, template: &Template, root: &Value) -> Result<Outcome> {
    if source.is_null() {
        return Ok(Outcome::Absent);
    }
    build(source, template, root)
}

fn build(source: &Value, template: &Template, root: &Value) -> Result<Outcome> {
    match source {
        Value::Array(items) => {
            let records = items
                .iter()
                .enumerate()
                .map(|(i, item)| build_record(item, template, root, Some(i)))
                .collect::<Result<Vec<_>>>()?;
            Ok(Outcome::records(records))
        }
        _ => build_record(source, template, root, None),
    }
}

fn build_record(
    source: &Value,
    template: &Template,
    root: &Value,
    index: Option<usize>,
) -> Result<Outcome> {
    let fields = template
        .iter()
        .map(|(name, spec)| -> Result<(String, Outcome)> {
            Ok((name.to_string(), evaluate(source, spec, root, index)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Outcome::record(fields))
}
