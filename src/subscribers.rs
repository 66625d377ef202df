// Copyright 2025 Cowboy AI, LLC.

//! Ordered fan-out bookkeeping shared by every publishing node.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::capability::Subscriber;
use crate::errors::ChainResult;
use crate::inspect::NodeDescription;

/// Downstream subscribers of one node, in registration order.
///
/// The list only grows. Delivery walks a snapshot taken when the delivery
/// starts, so a subscriber registered while a push is in flight first hears
/// from the next push. Each subscriber's whole subtree finishes before the
/// next sibling is visited; the first error stops the walk.
pub struct SubscriberList<T> {
    entries: RefCell<Vec<Rc<dyn Subscriber<T>>>>,
}

impl<T> SubscriberList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Append a subscriber
    pub fn push(&self, subscriber: Rc<dyn Subscriber<T>>) {
        self.entries.borrow_mut().push(subscriber);
    }

    /// Number of registered subscribers
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True if nothing is subscribed
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn snapshot(&self) -> Vec<Rc<dyn Subscriber<T>>> {
        self.entries.borrow().clone()
    }

    /// Push absence to every subscriber
    pub fn deliver_absent(&self) -> ChainResult<()> {
        for subscriber in self.snapshot() {
            subscriber.on_absent()?;
        }
        Ok(())
    }

    /// Describe every subscriber's subtree
    pub fn describe(&self) -> Vec<NodeDescription> {
        self.entries
            .borrow()
            .iter()
            .map(|subscriber| subscriber.describe())
            .collect()
    }
}

impl<T: Clone> SubscriberList<T> {
    /// Push a value to every subscriber; the last one receives it by move
    pub fn deliver_value(&self, value: T) -> ChainResult<()> {
        let subscribers = self.snapshot();
        if let Some((last, rest)) = subscribers.split_last() {
            for subscriber in rest {
                subscriber.on_value(value.clone())?;
            }
            last.on_value(value)?;
        }
        Ok(())
    }
}

impl<T> Default for SubscriberList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SubscriberList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberList")
            .field("len", &self.len())
            .finish()
    }
}
