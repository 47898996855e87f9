//! Template mapping engine
//!
//! This module turns a source JSON value and a [`Template`] into an output
//! record (or a sequence of records). Work is split in two phases: a
//! synchronous pass that validates field specs, resolves paths and recurses
//! into nested templates, and an asynchronous join of whatever formatting
//! results were deferred.
//!
//! Copyright (c) 2025 Jsonmap Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod descriptor;
pub mod engine;
pub mod evaluator;
pub mod formatting;
pub mod outcome;
pub mod path;
pub mod resolver;
pub mod template;

pub use builder::FieldSpecBuilder;
pub use descriptor::{normalize, Descriptor, DescriptorKey, SpecError};
pub use engine::apply_template;
pub use evaluator::evaluate;
pub use formatting::{Formatted, Formatter};
pub use outcome::Outcome;
pub use path::{FieldPath, Segment};
pub use resolver::{resolve, Resolution};
pub use template::{FieldSpec, Property, Template};
