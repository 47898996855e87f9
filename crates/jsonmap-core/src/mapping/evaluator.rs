//! Field evaluation
//!
//! Combines path resolution with nested-template recursion and the field's
//! formatting function, producing one [`Outcome`] per field.
//!
//! Copyright (c) 2025 Jsonmap Team
//! Licensed under the Apache-2.0 license

use super::descriptor::{normalize, Descriptor};
use super::engine::apply_nested;
use super::outcome::Outcome;
use super::resolver::{resolve, Resolution};
use super::template::FieldSpec;
use crate::Result;
use serde_json::Value;
use tracing::trace;

/// Evaluate one field specification against `source`
///
/// Specification and path errors are returned immediately; only deferred
/// formatting results are left pending in the outcome.
pub fn evaluate(
    source: &Value,
    spec: &FieldSpec,
    root: &Value,
    index: Option<usize>,
) -> Result<Outcome> {
    let descriptor = normalize(spec)?;
    evaluate_descriptor(source, &descriptor, root, index)
}

/// Evaluate an already normalized descriptor
pub(crate) fn evaluate_descriptor(
    source: &Value,
    descriptor: &Descriptor<'_>,
    root: &Value,
    index: Option<usize>,
) -> Result<Outcome> {
    let value = match resolve(source, descriptor, root, index)? {
        Resolution::Missing => return Ok(Outcome::Absent),
        Resolution::Settled(outcome) => return Ok(outcome),
        Resolution::Found(value) => value,
    };
    trace!(path = %descriptor.path, ?index, "resolved field");

    let outcome = match descriptor.nested {
        Some(template) => apply_nested(&value, template, root)?,
        None => Outcome::Ready(value.into_owned()),
    };

    match descriptor.formatting {
        Some(formatter) => {
            let formatter = formatter.clone();
            let path = descriptor.path.text().to_string();
            outcome.and_then(move |value| formatter.apply(value, index, &path))
        }
        None => Ok(outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{Formatter, Template};
    use crate::types::ValueType;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn eval(source: &Value, spec: FieldSpec) -> Option<Value> {
        evaluate(source, &spec, source, None)
            .unwrap()
            .settle()
            .await
            .unwrap()
    }

    fn suffix() -> Formatter {
        Formatter::sync(|value, _| {
            Ok(json!(format!("{}_formatted", value.as_str().unwrap_or_default())))
        })
    }

    #[tokio::test]
    async fn test_basic() {
        let source = json!({"field": "value"});
        assert_eq!(eval(&source, "field".into()).await, Some(json!("value")));
    }

    #[tokio::test]
    async fn test_basic_with_formatting() {
        let source = json!({"field1": {"field2": {"field3": "value"}}});
        let spec = FieldSpec::builder("field1.field2.field3")
            .formatting(suffix())
            .build();
        assert_eq!(eval(&source, spec).await, Some(json!("value_formatted")));
    }

    #[tokio::test]
    async fn test_array_with_formatting_applies_per_item_once() {
        let source = json!([{"field": "value1"}, {"field": "value2"}, {"field": "value3"}]);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let spec = FieldSpec::builder("field")
            .formatting(Formatter::sync(move |value, index| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(json!(format!("{}_{}", value.as_str().unwrap_or_default(), index.unwrap_or(99))))
            }))
            .build();
        assert_eq!(
            eval(&source, spec).await,
            Some(json!(["value1_0", "value2_1", "value3_2"]))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_missing_optional_skips_formatting() {
        let source = json!({});
        let spec = FieldSpec::builder("x")
            .optional()
            .formatting(Formatter::sync(|_, _| panic!("must not format an absent field")))
            .build();
        assert_eq!(eval(&source, spec).await, None);
    }

    #[tokio::test]
    async fn test_formatting_applies_to_default() {
        let source = json!({});
        let spec = FieldSpec::builder("x")
            .default_value("D")
            .formatting(Formatter::sync(|value, _| Ok(json!([value]))))
            .build();
        assert_eq!(eval(&source, spec).await, Some(json!(["D"])));
    }

    #[tokio::test]
    async fn test_nested_then_formatting() {
        let source = json!({"a": {"b": 1}});
        let spec = FieldSpec::builder("a")
            .value_type(ValueType::Object)
            .nested(Template::new().field("r", "b"))
            .formatting(Formatter::sync(|value, _| Ok(json!({"wrapped": value}))))
            .build();
        assert_eq!(
            eval(&source, spec).await,
            Some(json!({"wrapped": {"r": 1}}))
        );
    }

    #[tokio::test]
    async fn test_formatting_chains_after_pending_nested() {
        let source = json!({"a": {"b": "x"}});
        let inner = FieldSpec::builder("b")
            .formatting(Formatter::deferred(|value, _| async move { Ok(json!([value])) }))
            .build();
        let spec = FieldSpec::builder("a")
            .nested(Template::new().field("r", inner))
            .formatting(Formatter::sync(|value, _| Ok(json!({"outer": value}))))
            .build();
        assert_eq!(
            eval(&source, spec).await,
            Some(json!({"outer": {"r": ["x"]}}))
        );
    }

    #[tokio::test]
    async fn test_deferred_formatting() {
        let source = json!({"email": "a@example.com"});
        let spec = FieldSpec::builder("email")
            .formatting(Formatter::deferred(|email, _| async move {
                Ok(json!([{"email": email}]))
            }))
            .build();
        assert_eq!(
            eval(&source, spec).await,
            Some(json!([{"email": "a@example.com"}]))
        );
    }

    #[test]
    fn test_spec_errors_are_immediate() {
        let source = json!({});
        let spec = FieldSpec::properties([("property", json!("invalid"))]);
        let err = evaluate(&source, &spec, &source, None).unwrap_err();
        assert!(err.is_invalid_spec());
        assert_eq!(err.to_string(), "Invalid property property");
    }

    #[test]
    fn test_path_errors_are_immediate() {
        let source = json!({"field1": {"field2": {"field3": "value"}}});
        let err = evaluate(&source, &"field1.field4.field3".into(), &source, None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid path field1.field4.field3 (field4)");
    }
}
