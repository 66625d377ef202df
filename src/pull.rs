// Copyright 2025 Cowboy AI, LLC.

//! Deferred pull: the same composition, evaluated on demand.
//!
//! A `Deferred` is wired with [`Deferred::bind`] exactly like a push chain
//! but nothing runs until its outcome is pulled. Each node remembers its
//! outcome, so a function runs at most once however often, and through
//! however many downstream nodes, its result is requested.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use crate::errors::ChainResult;
use crate::maybe::Maybe;

struct Node<T> {
    compute: Box<dyn Fn() -> Maybe<T>>,
    outcome: OnceCell<Maybe<T>>,
}

/// Lazily evaluated, memoised outcome
pub struct Deferred<T> {
    node: Rc<Node<T>>,
}

impl<T: Clone + 'static> Deferred<T> {
    /// Start a deferred chain from a value
    pub fn of(value: T) -> Self {
        Self::from_fn(move || Maybe::Value(value.clone()))
    }

    /// Start a deferred chain from a function run on first pull
    pub fn from_fn<F>(compute: F) -> Self
    where
        F: Fn() -> Maybe<T> + 'static,
    {
        Self {
            node: Rc::new(Node {
                compute: Box::new(compute),
                outcome: OnceCell::new(),
            }),
        }
    }

    /// Extend the chain; `f` runs on first pull, and only if this node has a
    /// value
    pub fn bind<U, F>(&self, f: F) -> Deferred<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> Maybe<U> + 'static,
    {
        let upstream = self.clone();
        Deferred::from_fn(move || upstream.get().bind(&f))
    }

    /// Pull the outcome, evaluating upstream on first use
    pub fn get(&self) -> Maybe<T> {
        self.node
            .outcome
            .get_or_init(|| (self.node.compute)())
            .clone()
    }

    /// Pull and report whether a value is present
    pub fn has_value(&self) -> bool {
        self.get().has_value()
    }

    /// Pull the value; fails with [`ChainError::NoValue`](crate::ChainError::NoValue) when absent
    pub fn value(&self) -> ChainResult<T> {
        self.get().into_value()
    }

    /// True once the outcome has been computed
    pub fn is_evaluated(&self) -> bool {
        self.node.outcome.get().is_some()
    }
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("outcome", &self.node.outcome.get())
            .finish()
    }
}
