//! Boolean combinators for reactive signals.
//!
//! Four helpers that combine reactive boolean values with the standard
//! logical operators, each returning a lazily memoized [`Memo<bool>`]:
//!
//! - [`and`] - true when every source is true (vacuously true for zero
//!   sources)
//! - [`or`] - true when at least one source is true (vacuously false for
//!   zero sources)
//! - [`not`] - the complement of a single source
//! - [`pr`] - projects one source of any type through a boolean predicate
//!
//! Sources are consumed through the [`ReadSignal`] trait, so signals, memos,
//! and the output of other combinators all compose freely:
//!
//! ```ignore
//! use siglogic_reactive::Signal;
//! use siglogic_combinators::{and, not, or};
//!
//! let a = Signal::new(true);
//! let b = Signal::new(false);
//!
//! // De Morgan: !(a && b) == !a || !b
//! let lhs = not(&and(&[a.clone(), b.clone()]));
//! let rhs = or(&[not(&a), not(&b)]);
//! assert_eq!(lhs.get(), rhs.get());
//! ```
//!
//! The combinators never mutate their inputs and hold no state of their own;
//! memoization and re-evaluation belong to the reactive runtime.
//!
//! [`Memo<bool>`]: siglogic_reactive::Memo

mod and;
mod not;
mod or;
mod pr;
mod source;

pub use and::and;
pub use not::not;
pub use or::or;
pub use pr::pr;
pub use source::ReadSignal;
