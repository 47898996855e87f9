//! Jsonmap Core - Declarative JSON-to-JSON field mapping
//!
//! This crate maps a source JSON value into a new shape described by a
//! [`Template`]: a set of output field names, each bound to a dotted path into
//! the source plus optional nested templates, formatting functions and
//! defaults.
//!
//! # Main Components
//!
//! - **Error Handling**: [`Error`] built with `thiserror`, formatting failures carried as `anyhow`
//! - **Templates**: [`Template`], [`FieldSpec`] and [`FieldSpecBuilder`]
//! - **Mapping Engine**: path resolution with sequence fan-out, nested templates, deferred formatting
//!
//! # Example
//!
//! ```no_run
//! use jsonmap_core::{map, FieldSpec, Formatter, Result, Template};
//! use serde_json::json;
//!
//! async fn example() -> Result<()> {
//!     let template = Template::new()
//!         .field("name", "user.name")
//!         .field(
//!             "emails",
//!             FieldSpec::builder("user.contacts.email")
//!                 .formatting(Formatter::sync(|v, _| Ok(json!(v.as_str().map(str::to_lowercase)))))
//!                 .optional(),
//!         );
//!     let output = map(&json!({"user": {"name": "Ada", "contacts": []}}), &template).await?;
//!     assert_eq!(output["name"], "Ada");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod mapping;
pub mod types;

#[cfg(test)]
mod proptest_strategies;

pub use error::{Error, Result};
pub use mapping::{
    apply_template, FieldPath, FieldSpec, FieldSpecBuilder, Formatted, Formatter, Outcome,
    Property, SpecError, Template,
};
pub use types::ValueType;

use serde_json::Value;
use tracing::debug;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Map `source` through `template`
///
/// Resolves to a mapping, or a sequence of mappings when `source` is a
/// sequence. Any specification, path or formatting error aborts the whole
/// call; there are no partial results.
pub async fn map(source: &Value, template: &Template) -> Result<Value> {
    map_optional(Some(source), Some(template)).await
}

/// Map a possibly absent source through a possibly absent template
///
/// Either input being absent (or a null source) yields an empty mapping.
pub async fn map_optional(source: Option<&Value>, template: Option<&Template>) -> Result<Value> {
    let outcome = apply_template(source, template, None)?;
    if outcome.is_pending() {
        debug!("awaiting deferred formatting results");
    }
    Ok(outcome
        .settle()
        .await?
        .unwrap_or_else(|| Value::Object(Default::default())))
}

/// Synchronous version of [`map`]
///
/// Creates a current-thread runtime internally; prefer [`map`] from async code.
#[cfg(feature = "blocking")]
pub fn map_blocking(source: &Value, template: &Template) -> Result<Value> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(map(source, template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_map_optional_absent_inputs() {
        assert_eq!(map_optional(None, None).await.unwrap(), json!({}));
        let template = Template::new().field("f", "x");
        assert_eq!(map_optional(None, Some(&template)).await.unwrap(), json!({}));
        assert_eq!(map_optional(Some(&json!({})), None).await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_map_basic() {
        let template = Template::new().field("field", "field");
        let output = map(&json!({"field": "value"}), &template).await.unwrap();
        assert_eq!(output, json!({"field": "value"}));
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn test_map_blocking() {
        let template = Template::new().field("out", "a.b");
        let output = map_blocking(&json!({"a": {"b": 1}}), &template).unwrap();
        assert_eq!(output, json!({"out": 1}));
    }
}
