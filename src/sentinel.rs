// Copyright 2025 Cowboy AI, LLC.

//! Sentinel encoding: absence carried as a reserved payload value.
//!
//! Integer-only pipelines often encode "no result" as `-1`. This module
//! expresses that convention on top of the same push chain used for
//! explicit absence, so both encodings share one composition protocol:
//!
//! - a sentinel arriving as a value is forwarded as absence without running
//!   the step's function;
//! - a function returning the sentinel produces absence;
//! - a sentinel sink sees absence as the sentinel again.
//!
//! A chain built this way behaves exactly like the equivalent chain built
//! with [`Maybe`].

use std::fmt::Debug;
use std::rc::Rc;

use crate::capability::Publisher;
use crate::compose::{compose, Bind};
use crate::maybe::Maybe;
use crate::pull::Deferred;
use crate::source::Source;
use crate::step::Step;

/// Payload type with one value reserved to mean "no result"
pub trait Sentinel: Copy + PartialEq + Debug + 'static {
    /// The reserved value
    const ABSENT: Self;

    /// True if this is the reserved value
    fn is_absent(self) -> bool {
        self == Self::ABSENT
    }
}

impl Sentinel for i32 {
    const ABSENT: Self = -1;
}

impl Sentinel for i64 {
    const ABSENT: Self = -1;
}

/// Decode a sentinel-encoded value
pub fn to_maybe<W: Sentinel>(value: W) -> Maybe<W> {
    if value.is_absent() {
        Maybe::Absent
    } else {
        Maybe::Value(value)
    }
}

/// Encode an outcome with the sentinel
pub fn from_maybe<W: Sentinel>(outcome: Maybe<W>) -> W {
    match outcome {
        Maybe::Value(value) => value,
        Maybe::Absent => W::ABSENT,
    }
}

/// Create a chain head for a sentinel-encoded value.
///
/// The raw value is pushed as is, so a step or sink that is not
/// sentinel-aware sees `-1` as an ordinary value. A sentinel head is turned
/// into absence by the first [`SentinelBind::bind_sentinel`] step.
pub fn source<W: Sentinel>(value: W) -> Source<W> {
    Source::new(value)
}

/// Immediate form: apply `f` unless `value` already is the sentinel
pub fn bind<W, F>(value: W, f: F) -> W
where
    W: Sentinel,
    F: FnOnce(W) -> W,
{
    if value.is_absent() {
        W::ABSENT
    } else {
        f(value)
    }
}

/// Start a deferred pull chain for a sentinel-encoded value
pub fn deferred<W: Sentinel>(value: W) -> Deferred<W> {
    Deferred::from_fn(move || to_maybe(value))
}

impl<W: Sentinel> Deferred<W> {
    /// Extend a pull chain with a sentinel-encoded function; `f` does not
    /// run when the upstream outcome is the sentinel
    pub fn bind_sentinel<F>(&self, f: F) -> Deferred<W>
    where
        F: Fn(W) -> W + 'static,
    {
        self.bind(move |value| to_maybe(f(value)))
    }

    /// Pull the outcome, with the sentinel standing for absence
    pub fn get_sentinel(&self) -> W {
        from_maybe(self.get())
    }
}

/// Wiring operations for sentinel-encoded chains
pub trait SentinelBind<W: Sentinel>: Publisher<W> {
    /// Wire a step applying `f`; sentinels pass through without calling `f`
    fn bind_sentinel<F>(&self, f: F) -> Rc<Step<W, W>>
    where
        F: Fn(W) -> W + 'static,
    {
        compose(self, move |value: W, out| {
            if value.is_absent() {
                out.emit_absent()
            } else {
                out.emit(to_maybe(f(value)))
            }
        })
    }

    /// Terminate with a callback that receives the sentinel for absence
    fn to_sentinel_output<F>(&self, f: F)
    where
        F: Fn(W) + 'static,
    {
        Bind::<W>::to_maybe_output(self, move |outcome| f(from_maybe(outcome)))
    }
}

impl<W: Sentinel, P: Publisher<W> + ?Sized> SentinelBind<W> for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn reciprocal_per_mille(x: i32) -> i32 {
        if x == 0 {
            -1
        } else {
            1000 / x
        }
    }

    #[test]
    fn test_immediate_bind() {
        assert_eq!(bind(bind(42, |x| x * 10 + 1), reciprocal_per_mille), 2);
        assert_eq!(bind(bind(-1, |x| x * 10 + 1), reciprocal_per_mille), -1);
        assert_eq!(bind(0, reciprocal_per_mille), -1);
    }

    #[test]
    fn test_encoding_round_trip() {
        assert_eq!(to_maybe(7i64), Maybe::Value(7));
        assert_eq!(to_maybe(-1i64), Maybe::Absent);
        assert_eq!(from_maybe(Maybe::<i32>::Absent), -1);
        assert_eq!(from_maybe(Maybe::Value(3i32)), 3);
    }

    #[test]
    fn test_sentinel_chain() {
        let result = Rc::new(Cell::new(0));
        let writer = result.clone();

        let program = source(42);
        program
            .bind_sentinel(|x| x * 10 + 1)
            .bind_sentinel(reciprocal_per_mille)
            .to_sentinel_output(move |x| writer.set(x));
        program.run().unwrap();

        assert_eq!(result.get(), 2);
    }

    #[test]
    fn test_sentinel_head_reaches_plain_nodes_as_a_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let calls = Rc::new(Cell::new(0));
        let (writer, counter) = (seen.clone(), calls.clone());

        let program = source(-1);
        program.to_maybe_output(move |m: Maybe<i32>| writer.borrow_mut().push(m));
        program.map(move |x: i32| {
            counter.set(counter.get() + 1);
            x + 1
        });
        program.run().unwrap();

        assert_eq!(*seen.borrow(), vec![Maybe::Value(-1)]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_deferred_sentinel_chain() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let chain = deferred(0)
            .bind_sentinel(reciprocal_per_mille)
            .bind_sentinel(move |x| {
                counter.set(counter.get() + 1);
                x + 1
            });

        assert!(!chain.is_evaluated());
        assert_eq!(chain.get_sentinel(), -1);
        assert_eq!(chain.get(), Maybe::Absent);
        assert_eq!(calls.get(), 0);

        let chain = deferred(42)
            .bind_sentinel(|x| x * 10 + 1)
            .bind_sentinel(reciprocal_per_mille);
        assert_eq!(chain.get_sentinel(), 2);
    }

    #[test]
    fn test_deferred_sentinel_head_skips_function() {
        let chain = deferred(-1i64).bind_sentinel(|_| panic!("ran on the sentinel"));
        assert_eq!(chain.get_sentinel(), -1);
    }

    #[test]
    fn test_sentinel_head_skips_every_function() {
        let calls = Rc::new(Cell::new(0));
        let result = Rc::new(Cell::new(0));
        let (counter, writer) = (calls.clone(), result.clone());

        let program = source(-1);
        program
            .bind_sentinel(move |x| {
                counter.set(counter.get() + 1);
                x
            })
            .to_sentinel_output(move |x| writer.set(x));
        program.run().unwrap();

        assert_eq!(calls.get(), 0);
        assert_eq!(result.get(), -1);
    }
}
