// Copyright 2025 Cowboy AI, LLC.

//! The channel value: a payload or an explicit absence.
//!
//! A push chain signals outcomes through two calls (`on_value`/`on_absent`);
//! `Maybe` is the same outcome held as data. The two are interchangeable:
//! [`Emitter::emit`](crate::Emitter::emit) turns a `Maybe` into the matching
//! call and [`Bind::to_maybe_output`](crate::Bind::to_maybe_output) turns the
//! call back into a `Maybe`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{ChainError, ChainResult};

/// A present payload of type `T`, or an explicit absence marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value")]
pub enum Maybe<T> {
    /// A payload is present
    Value(T),
    /// No result
    Absent,
}

impl<T> Maybe<T> {
    /// True if a payload is present
    pub fn has_value(&self) -> bool {
        matches!(self, Maybe::Value(_))
    }

    /// Borrow the payload; fails with [`ChainError::NoValue`] when absent
    pub fn value(&self) -> ChainResult<&T> {
        match self {
            Maybe::Value(v) => Ok(v),
            Maybe::Absent => Err(ChainError::NoValue),
        }
    }

    /// Take the payload; fails with [`ChainError::NoValue`] when absent
    pub fn into_value(self) -> ChainResult<T> {
        match self {
            Maybe::Value(v) => Ok(v),
            Maybe::Absent => Err(ChainError::NoValue),
        }
    }

    /// Map over the payload, keeping absence
    pub fn map<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Maybe::Value(v) => Maybe::Value(f(v)),
            Maybe::Absent => Maybe::Absent,
        }
    }

    /// Immediate bind: apply `f` to the payload, or stay absent without
    /// calling `f`
    pub fn bind<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Maybe<U>,
    {
        match self {
            Maybe::Value(v) => f(v),
            Maybe::Absent => Maybe::Absent,
        }
    }

    /// Borrowing view of the payload
    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Value(v) => Maybe::Value(v),
            Maybe::Absent => Maybe::Absent,
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::Absent
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Maybe::Value(v),
            None => Maybe::Absent,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        match maybe {
            Maybe::Value(v) => Some(v),
            Maybe::Absent => None,
        }
    }
}
