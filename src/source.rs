// Copyright 2025 Cowboy AI, LLC.

//! Chain head: holds the value and starts the push cascade.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::capability::{Publisher, Subscriber};
use crate::config::ChainConfig;
use crate::errors::ChainResult;
use crate::identifiers::NodeId;
use crate::inspect::{short_type_name, NodeDescription, NodeKind};
use crate::subscribers::SubscriberList;

/// Head of a chain holding exactly one value.
///
/// Wiring onto a source never runs anything. [`Source::run`] pushes the held
/// value to every subscriber in registration order and returns once the
/// whole downstream cascade has completed. Running again re-pushes the same
/// value.
///
/// # Example
///
/// ```rust
/// use cim_chain::{Bind, Source};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let result = Rc::new(Cell::new(0));
/// let seen = result.clone();
///
/// let program = Source::new(42);
/// program
///     .bind(|x: i32, out| out.emit_value(x * 10 + 1))
///     .bind(|x: i32, out| if x == 0 { out.emit_absent() } else { out.emit_value(1000 / x) })
///     .to_output(move |x| seen.set(x), || {});
///
/// assert_eq!(result.get(), 0);
/// program.run().unwrap();
/// assert_eq!(result.get(), 2);
/// ```
pub struct Source<T> {
    id: NodeId,
    config: ChainConfig,
    value: T,
    subscribers: SubscriberList<T>,
}

impl<T: Clone> Source<T> {
    /// Create a source with the default configuration
    pub fn new(value: T) -> Self {
        Self::with_config(value, ChainConfig::default())
    }

    /// Create a source whose chain is governed by `config`
    pub fn with_config(value: T, config: ChainConfig) -> Self {
        Self {
            id: NodeId::new(),
            config,
            value,
            subscribers: SubscriberList::new(),
        }
    }

    /// Identity of this source
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The value pushed by [`Source::run`]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Number of downstream subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Push the held value through the chain.
    ///
    /// The first error raised anywhere downstream stops the cascade and is
    /// returned here; subscribers already visited keep their effects.
    pub fn run(&self) -> ChainResult<()> {
        debug!(
            chain = %self.config.name,
            node = %self.id,
            subscribers = self.subscribers.len(),
            "running source"
        );
        let result = self.subscribers.deliver_value(self.value.clone());
        match &result {
            Ok(()) => debug!(
                chain = %self.config.name,
                node = %self.id,
                "push cascade complete"
            ),
            Err(e) => debug!(
                chain = %self.config.name,
                node = %self.id,
                error = %e,
                "push cascade aborted"
            ),
        }
        result
    }

    /// Describe the whole chain wired below this source
    pub fn describe(&self) -> NodeDescription {
        NodeDescription {
            id: Some(self.id),
            kind: NodeKind::Source,
            name: "Source".to_string(),
            input: None,
            output: Some(short_type_name::<T>()),
            subscribers: self.subscribers.describe(),
        }
    }
}

impl<T> Publisher<T> for Source<T> {
    fn subscribe(&self, subscriber: Rc<dyn Subscriber<T>>) {
        self.subscribers.push(subscriber);
    }

    fn config(&self) -> ChainConfig {
        self.config.clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("id", &self.id)
            .field("chain", &self.config.name)
            .field("value", &self.value)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}
