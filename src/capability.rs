// Copyright 2025 Cowboy AI, LLC.

//! The two capabilities every chain node is built from.
//!
//! They point in opposite directions and are never merged:
//! - [`Publisher`] is the wiring-time relationship. A publisher accepts
//!   subscribers; nothing flows yet.
//! - [`Subscriber`] is the run-time relationship. A subscriber is pushed
//!   exactly one outcome per cascade: a value or an absence.
//!
//! A step node implements both, which is what lets a chain be extended by
//! wiring and later driven by pushing.

use std::rc::Rc;

use crate::config::ChainConfig;
use crate::errors::ChainResult;
use crate::inspect::{short_type_name, NodeDescription};

/// Receives pushed outcomes from exactly one upstream publisher
pub trait Subscriber<T> {
    /// A value arrived
    fn on_value(&self, value: T) -> ChainResult<()>;

    /// No value arrived
    fn on_absent(&self) -> ChainResult<()>;

    /// Describe this node and its downstream subtree
    fn describe(&self) -> NodeDescription {
        NodeDescription::opaque(short_type_name::<Self>(), short_type_name::<T>())
    }
}

/// Accepts subscribers at wiring time and pushes to them at run time
pub trait Publisher<T> {
    /// Register a downstream subscriber.
    ///
    /// Each call adds one more subscriber; delivery follows registration
    /// order.
    fn subscribe(&self, subscriber: Rc<dyn Subscriber<T>>);

    /// Configuration handed to steps wired onto this publisher
    fn config(&self) -> ChainConfig {
        ChainConfig::default()
    }
}

impl<T, P> Publisher<T> for Rc<P>
where
    P: Publisher<T> + ?Sized,
{
    fn subscribe(&self, subscriber: Rc<dyn Subscriber<T>>) {
        (**self).subscribe(subscriber)
    }

    fn config(&self) -> ChainConfig {
        (**self).config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::NodeKind;
    use std::cell::RefCell;

    struct Recorder {
        seen: RefCell<Vec<Option<i32>>>,
    }

    impl Subscriber<i32> for Recorder {
        fn on_value(&self, value: i32) -> ChainResult<()> {
            self.seen.borrow_mut().push(Some(value));
            Ok(())
        }

        fn on_absent(&self) -> ChainResult<()> {
            self.seen.borrow_mut().push(None);
            Ok(())
        }
    }

    #[test]
    fn test_default_description_is_opaque() {
        let recorder = Recorder {
            seen: RefCell::new(vec![]),
        };
        let description = recorder.describe();
        assert_eq!(description.kind, NodeKind::Opaque);
        assert_eq!(description.name, "Recorder");
        assert_eq!(description.input.as_deref(), Some("i32"));
    }

    #[test]
    fn test_shared_subscriber_trait_object() {
        let recorder = Rc::new(Recorder {
            seen: RefCell::new(vec![]),
        });
        let shared: Rc<dyn Subscriber<i32>> = recorder.clone();
        shared.on_value(5).unwrap();
        shared.on_absent().unwrap();
        assert_eq!(*recorder.seen.borrow(), vec![Some(5), None]);
    }
}
