//! Signal - Fine-grained Reactive Source
//!
//! `Signal<T>` is the core reactive primitive that holds a value and
//! automatically tracks dependencies when accessed.
//!
//! ## Key Features
//!
//! - **Automatic Dependency Tracking**: When `get()` is called inside an
//!   Effect or Memo, the dependency is automatically recorded.
//! - **Change Notification**: When `set()` or `update()` is called, dependent
//!   memos are invalidated and dependent effects are scheduled.
//! - **Lightweight**: `Signal<T>` is a NodeId plus a shared value slot, making
//!   it cheap to clone and pass around.
//!
//! ## Example
//!
//! ```ignore
//! use siglogic_reactive::Signal;
//!
//! // Create a signal
//! let count = Signal::new(0);
//!
//! // Read the value
//! assert_eq!(count.get(), 0);
//!
//! // Update the value
//! count.set(42);
//! assert_eq!(count.get(), 42);
//!
//! // Update with a function
//! count.update(|n| *n += 1);
//! assert_eq!(count.get(), 43);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::runtime::{NodeId, try_with_runtime, with_runtime};

/// A reactive signal that holds a value and tracks dependencies
///
/// `Signal<T>` represents a piece of state that can change over time, and
/// automatically notifies dependent computations when it changes.
///
/// ## Cloning
///
/// `Signal<T>` implements `Clone` and shares the value via `Rc<RefCell<T>>`.
/// All clones of the same Signal share the same underlying value.
#[derive(Clone)]
pub struct Signal<T: 'static> {
	/// Unique identifier for this signal
	id: NodeId,
	/// The actual value, shared via reference counting
	value: Rc<RefCell<T>>,
}

impl<T: 'static> Signal<T> {
	/// Create a new Signal with the given initial value
	///
	/// # Example
	///
	/// ```ignore
	/// let count = Signal::new(0);
	/// assert_eq!(count.get(), 0);
	/// ```
	pub fn new(value: T) -> Self {
		Self {
			id: NodeId::new(),
			value: Rc::new(RefCell::new(value)),
		}
	}

	/// Get the current value of the signal
	///
	/// This automatically tracks the dependency if called from within an
	/// Effect or Memo.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		// Track dependency with the runtime
		with_runtime(|rt| rt.track_dependency(self.id));

		// Get the value from storage
		self.get_untracked()
	}

	/// Get the current value without tracking dependencies
	///
	/// This is useful when you want to read a signal's value without creating
	/// a dependency relationship.
	pub fn get_untracked(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Set the signal to a new value
	///
	/// This invalidates all dependent Memos and schedules dependent Effects.
	pub fn set(&self, value: T) {
		trace!(signal = ?self.id, "signal set");
		*self.value.borrow_mut() = value;
		with_runtime(|rt| rt.notify_change(self.id));
	}

	/// Update the signal's value using a function
	///
	/// This is more efficient than `get()` + `set()` because it only notifies
	/// dependents once.
	///
	/// # Example
	///
	/// ```ignore
	/// let count = Signal::new(0);
	/// count.update(|n| *n += 1);
	/// assert_eq!(count.get(), 1);
	/// ```
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut *self.value.borrow_mut());
		with_runtime(|rt| rt.notify_change(self.id));
	}

	/// Get the NodeId of this signal
	///
	/// This is mainly for internal use by the runtime and tests.
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T: 'static> Drop for Signal<T> {
	fn drop(&mut self) {
		// Only remove the runtime node when this is the last Signal clone
		if Rc::strong_count(&self.value) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		}
	}
}

impl<T: fmt::Debug + Clone + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("id", &self.id)
			.field("value", &self.get_untracked())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::runtime::{NodeType, Observer};
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_signal_creation() {
		let signal = Signal::new(42);
		assert_eq!(signal.get_untracked(), 42);
	}

	#[test]
	#[serial]
	fn test_signal_set() {
		let signal = Signal::new(0);
		assert_eq!(signal.get_untracked(), 0);

		signal.set(100);
		assert_eq!(signal.get_untracked(), 100);
	}

	#[test]
	#[serial]
	fn test_signal_update() {
		let signal = Signal::new(0);

		signal.update(|n| *n += 1);
		assert_eq!(signal.get_untracked(), 1);

		signal.update(|n| *n *= 2);
		assert_eq!(signal.get_untracked(), 2);
	}

	#[test]
	#[serial]
	fn test_signal_clone() {
		let signal1 = Signal::new(42);
		let signal2 = signal1.clone();

		assert_eq!(signal1.get_untracked(), 42);
		assert_eq!(signal2.get_untracked(), 42);

		signal1.set(100);
		assert_eq!(signal1.get_untracked(), 100);
		assert_eq!(signal2.get_untracked(), 100);
	}

	#[test]
	#[serial]
	fn test_multiple_signals() {
		let signal1 = Signal::new(10);
		let signal2 = Signal::new(20);
		let signal3 = Signal::new("hello");

		assert_eq!(signal1.get_untracked(), 10);
		assert_eq!(signal2.get_untracked(), 20);
		assert_eq!(signal3.get_untracked(), "hello");

		signal1.set(30);
		signal2.set(40);
		signal3.set("world");

		assert_eq!(signal1.get_untracked(), 30);
		assert_eq!(signal2.get_untracked(), 40);
		assert_eq!(signal3.get_untracked(), "world");
	}

	#[test]
	#[serial]
	fn test_signal_dependency_tracking() {
		let signal = Signal::new(42);

		// Without observer, get() should still work
		assert_eq!(signal.get(), 42);

		// With observer, dependency should be tracked
		with_runtime(|rt| {
			let observer_id = NodeId::new();
			rt.push_observer(Observer {
				id: observer_id,
				node_type: NodeType::Memo,
			});

			// This should track the dependency
			let _ = signal.get();

			rt.pop_observer();

			// Verify dependency was tracked
			let graph = rt.dependency_graph.borrow();
			let signal_node = graph.get(&signal.id()).unwrap();
			assert!(signal_node.subscribers.contains(&observer_id));
		});
	}

	#[test]
	#[serial]
	fn test_signal_drop_removes_node() {
		let observer_id = NodeId::new();
		let signal = Signal::new(0);
		let signal_id = signal.id();

		with_runtime(|rt| {
			rt.push_observer(Observer {
				id: observer_id,
				node_type: NodeType::Memo,
			});
			let _ = signal.get();
			rt.pop_observer();

			assert!(rt.has_node(signal_id));
		});

		drop(signal);

		with_runtime(|rt| {
			assert!(!rt.has_node(signal_id));
		});
	}
}
