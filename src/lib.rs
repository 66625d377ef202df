// Copyright 2025 Cowboy AI, LLC.

//! # CIM Chain
//!
//! Deferred, push-based composition of single-value computations.
//!
//! A chain is *wired* first and *pushed* later. Wiring allocates nodes and
//! links them; nothing runs. Running the source pushes its one value through
//! every node synchronously, depth first, in registration order. At any step
//! a computation may produce no result; that absence flows to every sink
//! below it without entering any further user code.
//!
//! - **Source**: holds the value, starts the cascade
//! - **Step**: runs a transform `(input, emitter)` and fans its outcome out
//! - **Sink**: turns the final value or absence into an effect
//! - **Compose / Bind**: wires a new step onto any publisher
//!
//! ```rust
//! use cim_chain::{source, Bind};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let printed = Rc::new(RefCell::new(Vec::new()));
//! let (on_value, on_absent) = (printed.clone(), printed.clone());
//!
//! let program = source(1);
//! program
//!     .bind(|x: i32, out| out.emit_value(x + 2))
//!     .bind(|x: i32, out| {
//!         if x == 0 { out.emit_absent() } else { out.emit_value(1.0 / f64::from(x)) }
//!     })
//!     .to_output(
//!         move |x| on_value.borrow_mut().push(format!("Final result is {x}.")),
//!         move || on_absent.borrow_mut().push("Final result is nothing.".to_string()),
//!     );
//!
//! assert!(printed.borrow().is_empty());
//! program.run().unwrap();
//! assert_eq!(printed.borrow()[0], "Final result is 0.3333333333333333.");
//! ```
//!
//! ## Design Principles
//!
//! 1. **Two capabilities**: [`Publisher`] for wiring, [`Subscriber`] for data;
//!    they point in opposite directions and are never merged
//! 2. **Absence is an outcome**: not an error, it short-circuits for free
//! 3. **Encoding independence**: explicit absence ([`Maybe`]) and sentinel
//!    values ([`sentinel`]) run on the same protocol
//! 4. **Faults propagate**: every push returns [`ChainResult`]; the first
//!    error aborts the rest of the cascade and reaches the caller of `run`
//! 5. **Single threaded**: nodes are shared with `Rc`, the subscriber lists
//!    are only written while wiring

#![warn(missing_docs)]

mod capability;
mod compose;
mod config;
mod errors;
mod identifiers;
mod inspect;
mod maybe;
mod sink;
mod source;
mod step;
mod subscribers;
pub mod pull;
pub mod sentinel;

// Re-export core types
pub use capability::{Publisher, Subscriber};
pub use compose::{compose, run, sink, source, Bind};
pub use config::{ChainConfig, ContractPolicy};
pub use errors::{ChainError, ChainResult};
pub use identifiers::NodeId;
pub use inspect::{short_type_name, NodeDescription, NodeKind};
pub use maybe::Maybe;
pub use pull::Deferred;
pub use sentinel::{Sentinel, SentinelBind};
pub use sink::{Outcome, Sink};
pub use source::Source;
pub use step::{Emitter, Step};
pub use subscribers::SubscriberList;
