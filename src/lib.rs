//! # siglogic
//!
//! Boolean combinators for fine-grained reactive signals.
//!
//! siglogic provides four helpers - [`and`], [`or`], [`not`], and [`pr`] -
//! that combine reactive boolean values with the standard logical operators.
//! Each returns a lazily memoized derived value that tracks its inputs
//! automatically: update a source signal and the derived boolean reflects the
//! new combination on its next read, without being recreated.
//!
//! The reactive primitives themselves ([`Signal`], [`Memo`], [`Effect`]) live
//! in the `siglogic-reactive` member crate and are re-exported here; the
//! combinators consume them through the minimal [`ReadSignal`] read
//! capability, so they also run against any other source that can produce a
//! current value on demand.
//!
//! ## Example
//!
//! ```ignore
//! use siglogic::{Signal, and};
//!
//! let logged_in = Signal::new(true);
//! let verified = Signal::new(false);
//!
//! let can_post = and(&[logged_in.clone(), verified.clone()]);
//! assert!(!can_post.get());
//!
//! verified.set(true);
//! assert!(can_post.get());
//! ```
//!
//! ## Semantics
//!
//! - `and` over zero sources is vacuously `true`; `or` over zero sources is
//!   vacuously `false`
//! - `and`/`or` read their sources in order and short-circuit
//! - `pr` applies a caller-supplied predicate to a source of any type; a
//!   panicking predicate propagates to whoever reads the derived value
//! - combinators never mutate their inputs and hold no state of their own

pub use siglogic_combinators::{ReadSignal, and, not, or, pr};
pub use siglogic_reactive::{Effect, EffectTiming, Memo, Signal, flush_effects};

pub mod reactive {
	//! The underlying reactive runtime surface.
	pub use siglogic_reactive::*;
}
