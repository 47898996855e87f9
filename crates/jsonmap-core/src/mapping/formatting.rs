//! Caller-supplied formatting functions
//!
//! A formatting function receives the resolved (or nested-mapped) value and,
//! when the field is evaluated per array item, the zero-based item index. It
//! may answer immediately or hand back a deferred computation.
//!
//! Copyright (c) 2025 Jsonmap Team
//! Licensed under the Apache-2.0 license

use super::outcome::Outcome;
use crate::{Error, Result};
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Value produced by a formatting function
pub enum Formatted {
    /// Value available immediately
    Ready(Value),
    /// Value computed later; awaited when the mapping is joined
    Deferred(BoxFuture<'static, anyhow::Result<Value>>),
}

impl Formatted {
    /// Wrap a future as a deferred formatting result
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Formatted::Deferred(future.boxed())
    }
}

impl From<Value> for Formatted {
    fn from(value: Value) -> Self {
        Formatted::Ready(value)
    }
}

impl fmt::Debug for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatted::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Formatted::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

type FormatFn = dyn Fn(Value, Option<usize>) -> anyhow::Result<Formatted> + Send + Sync;

/// A formatting function attached to a field specification
#[derive(Clone)]
pub struct Formatter {
    func: Arc<FormatFn>,
}

impl Formatter {
    /// Create a formatter from a function that decides per call whether to defer
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Value, Option<usize>) -> anyhow::Result<Formatted> + Send + Sync + 'static,
    {
        Self { func: Arc::new(func) }
    }

    /// Create a formatter that always answers immediately
    pub fn sync<F>(func: F) -> Self
    where
        F: Fn(Value, Option<usize>) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::new(move |value, index| func(value, index).map(Formatted::Ready))
    }

    /// Create a formatter that always answers with a future
    pub fn deferred<F, Fut>(func: F) -> Self
    where
        F: Fn(Value, Option<usize>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Self::new(move |value, index| Ok(Formatted::deferred(func(value, index))))
    }

    /// Invoke the function and normalize its answer into an [`Outcome`]
    ///
    /// `path` only labels failures.
    pub fn apply(&self, value: Value, index: Option<usize>, path: &str) -> Result<Outcome> {
        match (self.func)(value, index) {
            Ok(Formatted::Ready(value)) => Ok(Outcome::Ready(value)),
            Ok(Formatted::Deferred(future)) => {
                let path = path.to_string();
                Ok(Outcome::Pending(
                    async move {
                        future
                            .await
                            .map(Some)
                            .map_err(|source| Error::Formatting { path, source })
                    }
                    .boxed(),
                ))
            }
            Err(source) => Err(Error::Formatting {
                path: path.to_string(),
                source,
            }),
        }
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formatter(..)")
    }
}
