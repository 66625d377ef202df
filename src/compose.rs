// Copyright 2025 Cowboy AI, LLC.

//! Wiring: the construction-time operations that build a chain.
//!
//! None of these functions runs a transform or delivers anything. They
//! allocate nodes and register them with their upstream publisher; the
//! chain stays inert until its source is run.
//!
//! Each node is owned by the subscriber list of its upstream (and by any
//! handle the caller keeps), so a chain lives as long as its source.

use std::rc::Rc;

use crate::capability::{Publisher, Subscriber};
use crate::errors::ChainResult;
use crate::maybe::Maybe;
use crate::sink::{Outcome, Sink};
use crate::source::Source;
use crate::step::{Emitter, Step};

/// Create a chain head holding `value`
pub fn source<T: Clone>(value: T) -> Source<T> {
    Source::new(value)
}

/// Extend a chain: wire a new step holding `transform` onto `publisher`.
///
/// The step inherits the publisher's configuration and is returned so the
/// next wiring call can chain onto it. Composing twice onto the same
/// publisher creates two sibling steps that both receive every push.
pub fn compose<T, U, P, F>(publisher: &P, transform: F) -> Rc<Step<T, U>>
where
    P: Publisher<T> + ?Sized,
    T: 'static,
    U: Clone + 'static,
    F: Fn(T, &Emitter<'_, U>) -> ChainResult<()> + 'static,
{
    let step = Rc::new(Step::with_config(publisher.config(), transform));
    let subscriber: Rc<dyn Subscriber<T>> = step.clone();
    publisher.subscribe(subscriber);
    step
}

/// Terminate a chain with two callbacks, one per outcome
pub fn sink<T, P, V, A>(publisher: &P, on_value: V, on_absent: A)
where
    P: Publisher<T> + ?Sized,
    T: 'static,
    V: Fn(T) + 'static,
    A: Fn() + 'static,
{
    publisher.subscribe(Rc::new(Sink::new(on_value, on_absent)));
}

/// Begin the push cascade from `source`
pub fn run<T: Clone>(source: &Source<T>) -> ChainResult<()> {
    source.run()
}

/// Method-chaining form of the wiring operations, available on every
/// publisher.
///
/// ```rust
/// use cim_chain::{source, Bind};
///
/// let program = source(1);
/// let outcome = program
///     .bind(|x: i32, out| out.emit_value(x + 2))
///     .bind(|x: i32, out| {
///         if x == 0 { out.emit_absent() } else { out.emit_value(1.0 / f64::from(x)) }
///     })
///     .capture();
///
/// program.run().unwrap();
/// assert_eq!(outcome.latest().unwrap().into_value().unwrap(), 1.0 / 3.0);
/// ```
pub trait Bind<T: 'static>: Publisher<T> {
    /// Wire a step holding `transform`; see [`compose`]
    fn bind<U, F>(&self, transform: F) -> Rc<Step<T, U>>
    where
        U: Clone + 'static,
        F: Fn(T, &Emitter<'_, U>) -> ChainResult<()> + 'static,
    {
        compose(self, transform)
    }

    /// Wire a step from a function returning a [`Maybe`]
    fn bind_maybe<U, F>(&self, f: F) -> Rc<Step<T, U>>
    where
        U: Clone + 'static,
        F: Fn(T) -> Maybe<U> + 'static,
    {
        compose(self, move |value, out| out.emit(f(value)))
    }

    /// Wire a step that always produces a value
    fn map<U, F>(&self, f: F) -> Rc<Step<T, U>>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + 'static,
    {
        compose(self, move |value, out| out.emit_value(f(value)))
    }

    /// Terminate with two infallible callbacks; see [`sink`]
    fn to_output<V, A>(&self, on_value: V, on_absent: A)
    where
        V: Fn(T) + 'static,
        A: Fn() + 'static,
    {
        sink(self, on_value, on_absent)
    }

    /// Terminate with callbacks that may fail and abort the push
    fn try_to_output<V, A>(&self, on_value: V, on_absent: A)
    where
        V: Fn(T) -> ChainResult<()> + 'static,
        A: Fn() -> ChainResult<()> + 'static,
    {
        self.subscribe(Rc::new(Sink::fallible(on_value, on_absent)));
    }

    /// Terminate with one callback receiving each outcome as a [`Maybe`]
    fn to_maybe_output<F>(&self, f: F)
    where
        F: Fn(Maybe<T>) + 'static,
    {
        self.subscribe(Rc::new(Sink::from_maybe(f)));
    }

    /// Terminate with a capturing sink and return its record
    fn capture(&self) -> Outcome<T> {
        let (outcome, sink) = Outcome::pair();
        self.subscribe(Rc::new(sink));
        outcome
    }
}

impl<T: 'static, P: Publisher<T> + ?Sized> Bind<T> for P {}
