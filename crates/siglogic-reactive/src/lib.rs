//! Fine-grained reactive primitives for siglogic.
//!
//! This crate implements a pull-based reactivity model similar to Leptos and
//! Solid.js. State lives in [`Signal`]s; derived values are [`Memo`]s that
//! recompute lazily when read after an upstream change; [`Effect`]s bridge the
//! reactive graph to the outside world.
//!
//! A thread-local [`runtime::Runtime`] owns the dependency graph. Reading a
//! signal or memo inside a memo or effect records the dependency
//! automatically; writing a signal invalidates dependent memos synchronously
//! and schedules dependent effects.
//!
//! # Example
//!
//! ```ignore
//! use siglogic_reactive::{Signal, Memo};
//!
//! let price = Signal::new(12);
//! let taxed = Memo::new({
//!     let price = price.clone();
//!     move || price.get() * 110 / 100
//! });
//!
//! assert_eq!(taxed.get(), 13);
//! price.set(100);
//! assert_eq!(taxed.get(), 110);
//! ```

pub mod effect;
pub mod memo;
pub mod runtime;
pub mod signal;

pub use effect::{Effect, flush_effects};
pub use memo::Memo;
pub use runtime::{EffectTiming, NodeId, Runtime, with_runtime};
pub use signal::Signal;
