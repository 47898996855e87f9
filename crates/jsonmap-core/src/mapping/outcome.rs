//! Uniform awaitable produced by field evaluation
//!
//! Every field evaluates to an [`Outcome`]: absent, available now, or pending
//! on a deferred formatting result. Sibling outcomes are joined positionally
//! with `try_join_all`, so completion order never changes output order.
//!
//! Copyright (c) 2025 Jsonmap Team
//! Licensed under the Apache-2.0 license

use crate::Result;
use futures::future::{try_join_all, BoxFuture, FutureExt};
use serde_json::{Map, Value};
use std::fmt;

/// Result of evaluating a field or applying a template
pub enum Outcome {
    /// The field resolved to nothing and is omitted from its record
    Absent,
    /// The value is available now
    Ready(Value),
    /// The value depends on a deferred formatting result
    Pending(BoxFuture<'static, Result<Option<Value>>>),
}

impl Outcome {
    /// Whether the outcome is known to be absent
    pub fn is_absent(&self) -> bool {
        matches!(self, Outcome::Absent)
    }

    /// Whether the outcome still has to be awaited
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending(_))
    }

    /// Await the outcome; `None` means absent
    pub async fn settle(self) -> Result<Option<Value>> {
        match self {
            Outcome::Absent => Ok(None),
            Outcome::Ready(value) => Ok(Some(value)),
            Outcome::Pending(future) => future.await,
        }
    }

    /// Convert into a boxed future so heterogeneous outcomes can be joined
    pub fn into_future(self) -> BoxFuture<'static, Result<Option<Value>>> {
        match self {
            Outcome::Pending(future) => future,
            other => async move { other.settle().await }.boxed(),
        }
    }

    /// Continue with the settled value; absent outcomes skip the continuation
    pub fn and_then<F>(self, continuation: F) -> Result<Outcome>
    where
        F: FnOnce(Value) -> Result<Outcome> + Send + 'static,
    {
        match self {
            Outcome::Absent => Ok(Outcome::Absent),
            Outcome::Ready(value) => continuation(value),
            Outcome::Pending(future) => Ok(Outcome::Pending(
                async move {
                    match future.await? {
                        Some(value) => continuation(value)?.settle().await,
                        None => Ok(None),
                    }
                }
                .boxed(),
            )),
        }
    }

    /// Substitute `fallback` when the outcome settles to absent
    pub fn or_value(self, fallback: Value) -> Outcome {
        match self {
            Outcome::Absent => Outcome::Ready(fallback),
            Outcome::Ready(value) => Outcome::Ready(value),
            Outcome::Pending(future) => Outcome::Pending(
                async move { Ok(Some(future.await?.unwrap_or(fallback))) }.boxed(),
            ),
        }
    }

    /// Join fan-out branches into one sequence
    ///
    /// Absent branches keep their position as `null`.
    pub fn sequence(items: Vec<Outcome>) -> Outcome {
        if !items.iter().any(Outcome::is_pending) {
            return Outcome::Ready(Value::Array(
                items.into_iter().map(Outcome::into_ready_or_null).collect(),
            ));
        }

        let futures = items.into_iter().map(Outcome::into_future);
        Outcome::Pending(
            async move {
                let values = try_join_all(futures).await?;
                Ok(Some(Value::Array(
                    values
                        .into_iter()
                        .map(|value| value.unwrap_or(Value::Null))
                        .collect(),
                )))
            }
            .boxed(),
        )
    }

    /// Join the records built from a sequence source
    ///
    /// Records that settled to absent are elided, so the result may be
    /// shorter than the source.
    pub fn records(items: Vec<Outcome>) -> Outcome {
        let items: Vec<Outcome> = items.into_iter().filter(|o| !o.is_absent()).collect();
        if !items.iter().any(Outcome::is_pending) {
            return Outcome::Ready(Value::Array(
                items.into_iter().filter_map(Outcome::into_ready).collect(),
            ));
        }

        let futures = items.into_iter().map(Outcome::into_future);
        Outcome::Pending(
            async move {
                let values = try_join_all(futures).await?;
                Ok(Some(Value::Array(values.into_iter().flatten().collect())))
            }
            .boxed(),
        )
    }

    /// Assemble one output record from its named fields
    ///
    /// Absent fields are dropped; a record without fields is itself absent.
    pub fn record(fields: Vec<(String, Outcome)>) -> Outcome {
        let fields: Vec<(String, Outcome)> = fields
            .into_iter()
            .filter(|(_, outcome)| !outcome.is_absent())
            .collect();

        if !fields.iter().any(|(_, outcome)| outcome.is_pending()) {
            let record: Map<String, Value> = fields
                .into_iter()
                .filter_map(|(name, outcome)| outcome.into_ready().map(|value| (name, value)))
                .collect();
            return Self::non_empty(record);
        }

        let (names, outcomes): (Vec<String>, Vec<Outcome>) = fields.into_iter().unzip();
        let futures = outcomes.into_iter().map(Outcome::into_future);
        Outcome::Pending(
            async move {
                let values = try_join_all(futures).await?;
                let record: Map<String, Value> = names
                    .into_iter()
                    .zip(values)
                    .filter_map(|(name, value)| value.map(|value| (name, value)))
                    .collect();
                Ok(Self::non_empty(record).into_ready())
            }
            .boxed(),
        )
    }

    fn non_empty(record: Map<String, Value>) -> Outcome {
        if record.is_empty() {
            Outcome::Absent
        } else {
            Outcome::Ready(Value::Object(record))
        }
    }

    fn into_ready(self) -> Option<Value> {
        match self {
            Outcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    fn into_ready_or_null(self) -> Value {
        self.into_ready().unwrap_or(Value::Null)
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Absent => f.write_str("Absent"),
            Outcome::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Outcome::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
