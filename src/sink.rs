// Copyright 2025 Cowboy AI, LLC.

//! Terminal consumers: where a chain's outcome becomes observable.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::capability::Subscriber;
use crate::errors::ChainResult;
use crate::identifiers::NodeId;
use crate::inspect::{short_type_name, NodeDescription, NodeKind};
use crate::maybe::Maybe;

type ValueCallback<T> = dyn Fn(T) -> ChainResult<()>;
type AbsentCallback = dyn Fn() -> ChainResult<()>;

/// Subscriber with no downstream that hands each outcome to a callback
pub struct Sink<T> {
    id: NodeId,
    on_value: Box<ValueCallback<T>>,
    on_absent: Box<AbsentCallback>,
}

impl<T> Sink<T> {
    /// Create a sink from two infallible callbacks
    pub fn new<V, A>(on_value: V, on_absent: A) -> Self
    where
        V: Fn(T) + 'static,
        A: Fn() + 'static,
    {
        Self::fallible(
            move |value| {
                on_value(value);
                Ok(())
            },
            move || {
                on_absent();
                Ok(())
            },
        )
    }

    /// Create a sink whose callbacks may fail; a failure aborts the push
    pub fn fallible<V, A>(on_value: V, on_absent: A) -> Self
    where
        V: Fn(T) -> ChainResult<()> + 'static,
        A: Fn() -> ChainResult<()> + 'static,
    {
        Self {
            id: NodeId::new(),
            on_value: Box::new(on_value),
            on_absent: Box::new(on_absent),
        }
    }

    /// Create a sink receiving every outcome as a [`Maybe`]
    pub fn from_maybe<F>(f: F) -> Self
    where
        F: Fn(Maybe<T>) + 'static,
    {
        let f = Rc::new(f);
        let g = f.clone();
        Self::new(move |value| f(Maybe::Value(value)), move || g(Maybe::Absent))
    }

    /// Identity of this sink
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<T> Subscriber<T> for Sink<T> {
    fn on_value(&self, value: T) -> ChainResult<()> {
        (self.on_value)(value)
    }

    fn on_absent(&self) -> ChainResult<()> {
        (self.on_absent)()
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription {
            id: Some(self.id),
            kind: NodeKind::Sink,
            name: "Sink".to_string(),
            input: Some(short_type_name::<T>()),
            output: None,
            subscribers: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Sink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("id", &self.id).finish()
    }
}

/// Handle onto a capturing sink: records every outcome pushed to it.
///
/// Clones share the same record.
#[derive(Clone)]
pub struct Outcome<T> {
    record: Rc<RefCell<Vec<Maybe<T>>>>,
}

impl<T: 'static> Outcome<T> {
    /// Create an empty record and the sink that fills it
    pub fn pair() -> (Self, Sink<T>) {
        let record = Rc::new(RefCell::new(Vec::new()));
        let writer = record.clone();
        let sink = Sink::from_maybe(move |outcome| writer.borrow_mut().push(outcome));
        (Self { record }, sink)
    }
}

impl<T> Outcome<T> {
    /// Number of outcomes received
    pub fn count(&self) -> usize {
        self.record.borrow().len()
    }

    /// True once at least one outcome has arrived
    pub fn is_settled(&self) -> bool {
        !self.record.borrow().is_empty()
    }
}

impl<T: Clone> Outcome<T> {
    /// Most recent outcome, if any arrived
    pub fn latest(&self) -> Option<Maybe<T>> {
        self.record.borrow().last().cloned()
    }

    /// Every outcome in arrival order
    pub fn history(&self) -> Vec<Maybe<T>> {
        self.record.borrow().clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outcome")
            .field("record", &self.record.borrow())
            .finish()
    }
}
