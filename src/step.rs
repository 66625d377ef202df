// Copyright 2025 Cowboy AI, LLC.

//! The step node: subscriber upstream, publisher downstream.
//!
//! A step holds one transform of shape `(input, emitter)`. On a value the
//! transform runs once and reports its outcome through the [`Emitter`], which
//! fans it out to the step's subscribers. On an absence the transform is not
//! run at all; the absence is forwarded as is.
//!
//! A transform must signal exactly one outcome per input. What happens
//! otherwise is governed by the chain's [`ContractPolicy`]; under the default
//! policy every emission is delivered as made, so two emissions reach
//! downstream twice and none leaves downstream silent for that push.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::capability::{Publisher, Subscriber};
use crate::config::{ChainConfig, ContractPolicy};
use crate::errors::{ChainError, ChainResult};
use crate::identifiers::NodeId;
use crate::inspect::{short_type_name, NodeDescription, NodeKind};
use crate::maybe::Maybe;
use crate::subscribers::SubscriberList;

type Transform<T, U> = dyn for<'a, 'b> Fn(T, &'b Emitter<'a, U>) -> ChainResult<()>;

/// Output capability handed to a transform for one invocation
pub struct Emitter<'a, U> {
    node: NodeId,
    config: &'a ChainConfig,
    subscribers: &'a SubscriberList<U>,
    emissions: Cell<usize>,
}

impl<'a, U: Clone> Emitter<'a, U> {
    fn new(node: NodeId, config: &'a ChainConfig, subscribers: &'a SubscriberList<U>) -> Self {
        Self {
            node,
            config,
            subscribers,
            emissions: Cell::new(0),
        }
    }

    /// Push a value to every subscriber of the step
    pub fn emit_value(&self, value: U) -> ChainResult<()> {
        self.admit()?;
        self.subscribers.deliver_value(value)
    }

    /// Push absence to every subscriber of the step
    pub fn emit_absent(&self) -> ChainResult<()> {
        self.admit()?;
        self.subscribers.deliver_absent()
    }

    /// Push whichever outcome `outcome` holds
    pub fn emit(&self, outcome: Maybe<U>) -> ChainResult<()> {
        match outcome {
            Maybe::Value(value) => self.emit_value(value),
            Maybe::Absent => self.emit_absent(),
        }
    }

    /// Outcomes signalled so far in this invocation
    pub fn emissions(&self) -> usize {
        self.emissions.get()
    }

    fn admit(&self) -> ChainResult<()> {
        let emissions = self.emissions.get() + 1;
        self.emissions.set(emissions);
        if emissions > 1 {
            match self.config.contract {
                ContractPolicy::Permissive => {}
                // one warning per invocation, at the first surplus outcome
                ContractPolicy::Warn if emissions > 2 => {}
                ContractPolicy::Warn => warn!(
                    chain = %self.config.name,
                    node = %self.node,
                    emissions,
                    "transform signalled more than one outcome"
                ),
                ContractPolicy::Strict => {
                    return Err(ChainError::ContractViolation {
                        node: self.node,
                        emissions,
                    })
                }
            }
        }
        Ok(())
    }

    fn finish(&self) -> ChainResult<()> {
        let emissions = self.emissions.get();
        if emissions == 1 {
            return Ok(());
        }
        match self.config.contract {
            ContractPolicy::Permissive => Ok(()),
            ContractPolicy::Warn => {
                // more than one was already reported by `admit`
                if emissions == 0 {
                    warn!(
                        chain = %self.config.name,
                        node = %self.node,
                        "transform returned without signalling an outcome"
                    );
                }
                Ok(())
            }
            ContractPolicy::Strict => Err(ChainError::ContractViolation {
                node: self.node,
                emissions,
            }),
        }
    }
}

/// Transform node linking a `T` publisher to `U` subscribers
pub struct Step<T, U> {
    id: NodeId,
    config: ChainConfig,
    transform: Box<Transform<T, U>>,
    subscribers: SubscriberList<U>,
}

impl<T, U: Clone> Step<T, U> {
    /// Create a step with the default configuration
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(T, &Emitter<'_, U>) -> ChainResult<()> + 'static,
    {
        Self::with_config(ChainConfig::default(), transform)
    }

    /// Create a step governed by `config`
    pub fn with_config<F>(config: ChainConfig, transform: F) -> Self
    where
        F: Fn(T, &Emitter<'_, U>) -> ChainResult<()> + 'static,
    {
        Self {
            id: NodeId::new(),
            config,
            transform: Box::new(transform),
            subscribers: SubscriberList::new(),
        }
    }

    /// Identity of this step
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Number of downstream subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T, U: Clone> Subscriber<T> for Step<T, U> {
    fn on_value(&self, value: T) -> ChainResult<()> {
        trace!(chain = %self.config.name, node = %self.id, "step received value");
        let emitter = Emitter::new(self.id, &self.config, &self.subscribers);
        (self.transform)(value, &emitter)?;
        emitter.finish()
    }

    fn on_absent(&self) -> ChainResult<()> {
        trace!(chain = %self.config.name, node = %self.id, "step forwarding absence");
        self.subscribers.deliver_absent()
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription {
            id: Some(self.id),
            kind: NodeKind::Step,
            name: "Step".to_string(),
            input: Some(short_type_name::<T>()),
            output: Some(short_type_name::<U>()),
            subscribers: self.subscribers.describe(),
        }
    }
}

impl<T, U: Clone> Publisher<U> for Step<T, U> {
    fn subscribe(&self, subscriber: Rc<dyn Subscriber<U>>) {
        self.subscribers.push(subscriber);
    }

    fn config(&self) -> ChainConfig {
        self.config.clone()
    }
}

impl<T, U> fmt::Debug for Step<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("chain", &self.config.name)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_warnings(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(count.clone()));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    #[derive(Default)]
    struct Collect {
        seen: RefCell<Vec<Maybe<i32>>>,
    }

    impl Subscriber<i32> for Collect {
        fn on_value(&self, value: i32) -> ChainResult<()> {
            self.seen.borrow_mut().push(Maybe::Value(value));
            Ok(())
        }

        fn on_absent(&self) -> ChainResult<()> {
            self.seen.borrow_mut().push(Maybe::Absent);
            Ok(())
        }
    }

    fn wired<F>(config: ChainConfig, transform: F) -> (Step<i32, i32>, Rc<Collect>)
    where
        F: Fn(i32, &Emitter<'_, i32>) -> ChainResult<()> + 'static,
    {
        let step = Step::with_config(config, transform);
        let collect = Rc::new(Collect::default());
        step.subscribe(collect.clone());
        (step, collect)
    }

    #[test]
    fn test_value_runs_transform() {
        let (step, collect) = wired(ChainConfig::default(), |x, out| out.emit_value(x * 3));
        step.on_value(4).unwrap();
        assert_eq!(*collect.seen.borrow(), vec![Maybe::Value(12)]);
    }

    #[test]
    fn test_absence_skips_transform() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let (step, collect) = wired(ChainConfig::default(), move |x, out| {
            counter.set(counter.get() + 1);
            out.emit_value(x)
        });

        step.on_absent().unwrap();

        assert_eq!(calls.get(), 0);
        assert_eq!(*collect.seen.borrow(), vec![Maybe::Absent]);
    }

    #[test]
    fn test_emit_maybe_dispatches() {
        let (step, collect) = wired(ChainConfig::default(), |x, out| {
            out.emit(if x > 0 { Maybe::Value(x) } else { Maybe::Absent })
        });
        step.on_value(2).unwrap();
        step.on_value(-2).unwrap();
        assert_eq!(*collect.seen.borrow(), vec![Maybe::Value(2), Maybe::Absent]);
    }

    #[test]
    fn test_transform_fault_propagates() {
        let (step, collect) = wired(ChainConfig::default(), |_, _| Err(ChainError::fault("boom")));
        assert_eq!(step.on_value(1), Err(ChainError::fault("boom")));
        assert!(collect.seen.borrow().is_empty());
    }

    #[test]
    fn test_permissive_delivers_double_emission() {
        let (step, collect) = wired(ChainConfig::default(), |x, out| {
            out.emit_value(x)?;
            out.emit_absent()
        });
        step.on_value(1).unwrap();
        assert_eq!(*collect.seen.borrow(), vec![Maybe::Value(1), Maybe::Absent]);
    }

    #[test]
    fn test_warn_policy_still_delivers() {
        let config = ChainConfig::default().with_contract(ContractPolicy::Warn);
        let (step, collect) = wired(config, |_, _| Ok(()));
        assert!(step.on_value(1).is_ok());
        assert!(collect.seen.borrow().is_empty());
    }

    #[test]
    fn test_warn_policy_warns_once_per_invocation() {
        let config = ChainConfig::default().with_contract(ContractPolicy::Warn);
        let (step, collect) = wired(config, |x, out| {
            out.emit_value(x)?;
            out.emit_value(x + 1)?;
            out.emit_value(x + 2)
        });

        let warnings = count_warnings(|| step.on_value(1).unwrap());

        assert_eq!(warnings, 1);
        assert_eq!(
            *collect.seen.borrow(),
            vec![Maybe::Value(1), Maybe::Value(2), Maybe::Value(3)]
        );
    }

    #[test]
    fn test_warn_policy_warns_on_silent_transform() {
        let config = ChainConfig::default().with_contract(ContractPolicy::Warn);
        let (step, _collect) = wired(config, |_, _| Ok(()));
        assert_eq!(count_warnings(|| step.on_value(1).unwrap()), 1);
    }

    #[test]
    fn test_strict_refuses_second_emission() {
        let config = ChainConfig::default().with_contract(ContractPolicy::Strict);
        let (step, collect) = wired(config, |x, out| {
            out.emit_value(x)?;
            out.emit_value(x + 1)
        });

        let err = step.on_value(1).unwrap_err();

        assert_eq!(
            err,
            ChainError::ContractViolation {
                node: step.id(),
                emissions: 2
            }
        );
        assert_eq!(*collect.seen.borrow(), vec![Maybe::Value(1)]);
    }

    #[test]
    fn test_strict_reports_missing_emission() {
        let config = ChainConfig::default().with_contract(ContractPolicy::Strict);
        let (step, _collect) = wired(config, |_, _| Ok(()));
        assert_eq!(
            step.on_value(1),
            Err(ChainError::ContractViolation {
                node: step.id(),
                emissions: 0
            })
        );
    }

    #[test]
    fn test_describe_lists_types_and_subscribers() {
        let (step, _collect) = wired(ChainConfig::default(), |x, out| out.emit_value(x));
        let description = step.describe();
        assert_eq!(description.kind, NodeKind::Step);
        assert_eq!(description.input.as_deref(), Some("i32"));
        assert_eq!(description.output.as_deref(), Some("i32"));
        assert_eq!(description.subscribers.len(), 1);
        assert_eq!(description.subscribers[0].name, "Collect");
    }
}
