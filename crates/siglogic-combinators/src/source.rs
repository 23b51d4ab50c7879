//! The read capability combinators require from a reactive source.

use siglogic_reactive::{Memo, Signal};

/// Read access to a reactive value.
///
/// Reading through this trait registers the caller as a dependent of the
/// source, so derived values recompute when the source changes. This is the
/// only capability the combinators require, which keeps the reactive engine
/// swappable: anything that can produce a current value on demand can drive
/// them, including hand-rolled test doubles.
pub trait ReadSignal<T> {
	/// Gets the current value.
	fn get(&self) -> T;
}

impl<T: Clone + 'static> ReadSignal<T> for Signal<T> {
	fn get(&self) -> T {
		Signal::get(self)
	}
}

impl<T: Clone + 'static> ReadSignal<T> for Memo<T> {
	fn get(&self) -> T {
		Memo::get(self)
	}
}
