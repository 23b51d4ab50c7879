//! Effect - Reactive Side Effects
//!
//! `Effect` represents a side effect that automatically re-runs when its
//! dependencies change. Dependencies are tracked automatically - any Signal
//! or Memo accessed inside the effect closure becomes a dependency.
//!
//! ## Key Features
//!
//! - **Automatic Dependency Tracking**: `get()` calls inside the effect are
//!   automatically tracked
//! - **Automatic Re-execution**: When a dependency changes, the effect either
//!   re-runs synchronously (immediate timing) or is queued for the next
//!   [`flush_effects`]
//! - **Memory Safe**: Automatically removes itself from the dependency graph
//!   when dropped
//!
//! ## Example
//!
//! ```ignore
//! use siglogic_reactive::{Signal, Effect, flush_effects};
//!
//! let count = Signal::new(0);
//!
//! // Create an effect that logs the count
//! let _effect = Effect::new(move || {
//!     // This get() call automatically creates a dependency
//!     println!("Count is: {}", count.get());
//! });
//!
//! count.set(42);
//! flush_effects(); // Prints: "Count is: 42"
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::trace;

use crate::runtime::{EffectTiming, NodeId, NodeType, Observer, try_with_runtime, with_runtime};

/// Type alias for effect functions
type EffectFn = Box<dyn FnMut() + 'static>;

// Global storage for Effect functions
//
// This stores the closures for all Effects so they can be re-executed when
// dependencies change.
thread_local! {
	static EFFECT_FUNCTIONS: RefCell<BTreeMap<NodeId, EffectFn>> = RefCell::new(BTreeMap::new());
}

// Global storage for Effect timing information
thread_local! {
	static EFFECT_TIMING: RefCell<BTreeMap<NodeId, EffectTiming>> =
		const { RefCell::new(BTreeMap::new()) };
}

/// Get the timing for an effect by its ID.
///
/// Returns `None` if the node is not an Effect.
pub(crate) fn get_effect_timing(effect_id: NodeId) -> Option<EffectTiming> {
	EFFECT_TIMING.with(|storage| storage.borrow().get(&effect_id).copied())
}

/// A reactive effect that automatically re-runs when its dependencies change
///
/// Effects are the bridge between the reactive system and the outside world.
/// They run immediately when created, and re-run whenever any Signal or Memo
/// they access changes.
pub struct Effect {
	/// Unique identifier for this effect
	id: NodeId,
	/// Whether this effect has been disposed
	disposed: Rc<RefCell<bool>>,
}

impl Effect {
	/// Create a new Effect that runs the given function
	///
	/// The function runs immediately. After a dependency change it is queued
	/// and re-runs on the next [`flush_effects`] (deferred timing).
	///
	/// # Arguments
	///
	/// * `f` - The effect function. Must be `FnMut() + 'static`.
	///
	/// # Example
	///
	/// ```ignore
	/// let count = Signal::new(0);
	///
	/// Effect::new(move || {
	///     println!("Count: {}", count.get());
	/// });
	/// ```
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		Self::new_with_timing(f, EffectTiming::default())
	}

	/// Create a new Effect with the given execution timing
	///
	/// Immediate effects re-run synchronously inside the notification that
	/// invalidated them; deferred effects wait for [`flush_effects`].
	///
	/// # Arguments
	///
	/// * `f` - The effect function. Must be `FnMut() + 'static`.
	/// * `timing` - The execution timing.
	pub fn new_with_timing<F>(mut f: F, timing: EffectTiming) -> Self
	where
		F: FnMut() + 'static,
	{
		let id = NodeId::new();
		let disposed = Rc::new(RefCell::new(false));

		// Store the effect function
		let disposed_clone = disposed.clone();
		EFFECT_FUNCTIONS.with(|storage| {
			storage.borrow_mut().insert(
				id,
				Box::new(move || {
					if !*disposed_clone.borrow() {
						f();
					}
				}),
			);
		});

		// Store the timing information
		EFFECT_TIMING.with(|storage| {
			storage.borrow_mut().insert(id, timing);
		});

		// Run the effect for the first time
		Self::execute_effect(id);

		Self { id, disposed }
	}

	/// Execute an effect by its ID
	///
	/// This is called internally by the runtime when an effect needs to re-run.
	pub(crate) fn execute_effect(effect_id: NodeId) {
		trace!(effect = ?effect_id, "executing effect");
		with_runtime(|rt| {
			// Clear old dependencies before re-running
			rt.clear_dependencies(effect_id);

			rt.push_observer(Observer {
				id: effect_id,
				node_type: NodeType::Effect,
			});
		});

		// Execute the effect function
		EFFECT_FUNCTIONS.with(|storage| {
			if let Some(effect_fn) = storage.borrow_mut().get_mut(&effect_id) {
				effect_fn();
			}
		});

		// Pop observer from stack
		with_runtime(|rt| {
			rt.pop_observer();
		});
	}

	/// Get the NodeId of this effect (for testing)
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Dispose this effect
	///
	/// After calling this, the effect will no longer run and its resources
	/// will be cleaned up.
	pub fn dispose(&self) {
		*self.disposed.borrow_mut() = true;

		// Remove from runtime's dependency graph (ignore if TLS is destroyed)
		let _ = try_with_runtime(|rt| rt.remove_node(self.id));

		// Remove from storage (ignore if TLS is destroyed)
		let _ = EFFECT_FUNCTIONS.try_with(|storage| {
			storage.borrow_mut().remove(&self.id);
		});
		let _ = EFFECT_TIMING.try_with(|storage| {
			storage.borrow_mut().remove(&self.id);
		});
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl crate::runtime::Runtime {
	/// Run all queued deferred effects
	///
	/// Effects queued while the flush is running wait for the next flush.
	pub fn flush_effects(&self) {
		let pending = std::mem::take(&mut *self.pending_effects.borrow_mut());
		for effect_id in pending {
			Effect::execute_effect(effect_id);
		}
	}
}

/// Run all queued deferred effects on the current thread's runtime
///
/// # Example
///
/// ```ignore
/// let count = Signal::new(0);
/// let _effect = Effect::new(move || println!("{}", count.get()));
///
/// count.set(1);
/// flush_effects();
/// ```
pub fn flush_effects() {
	with_runtime(|rt| rt.flush_effects());
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::signal::Signal;
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_effect_runs_immediately() {
		let run_count = Rc::new(RefCell::new(0));
		let run_count_clone = run_count.clone();

		let _effect = Effect::new(move || {
			*run_count_clone.borrow_mut() += 1;
		});

		assert_eq!(*run_count.borrow(), 1);
	}

	#[test]
	#[serial]
	fn test_effect_tracks_dependency() {
		let signal = Signal::new(0);
		let run_count = Rc::new(RefCell::new(0));
		let run_count_clone = run_count.clone();

		let signal_clone = signal.clone();
		let _effect = Effect::new(move || {
			let _ = signal_clone.get(); // Track dependency
			*run_count_clone.borrow_mut() += 1;
		});

		// Effect should have run once
		assert_eq!(*run_count.borrow(), 1);

		// Verify dependency was tracked
		with_runtime(|rt| {
			assert_eq!(rt.subscriber_count(signal.id()), 1);
		});
	}

	#[test]
	#[serial]
	fn test_effect_reruns_on_signal_change() {
		let signal = Signal::new(0);
		let values = Rc::new(RefCell::new(Vec::new()));
		let values_clone = values.clone();

		let signal_clone = signal.clone();
		let _effect = Effect::new(move || {
			values_clone.borrow_mut().push(signal_clone.get());
		});

		// Initial run
		assert_eq!(*values.borrow(), vec![0]);

		// Change signal and flush
		signal.set(10);
		flush_effects();
		assert_eq!(*values.borrow(), vec![0, 10]);

		// Change again
		signal.set(20);
		flush_effects();
		assert_eq!(*values.borrow(), vec![0, 10, 20]);
	}

	#[test]
	#[serial]
	fn test_immediate_effect_runs_without_flush() {
		let signal = Signal::new(0);
		let values = Rc::new(RefCell::new(Vec::new()));
		let values_clone = values.clone();

		let signal_clone = signal.clone();
		let _effect = Effect::new_with_timing(
			move || {
				values_clone.borrow_mut().push(signal_clone.get());
			},
			EffectTiming::Immediate,
		);

		assert_eq!(*values.borrow(), vec![0]);

		signal.set(10);
		assert_eq!(*values.borrow(), vec![0, 10]);
	}

	#[test]
	#[serial]
	fn test_effect_with_multiple_signals() {
		let signal1 = Signal::new(1);
		let signal2 = Signal::new(2);
		let sum = Rc::new(RefCell::new(0));
		let sum_clone = sum.clone();

		let s1 = signal1.clone();
		let s2 = signal2.clone();
		let _effect = Effect::new(move || {
			*sum_clone.borrow_mut() = s1.get() + s2.get();
		});

		// Initial run
		assert_eq!(*sum.borrow(), 3);

		// Change first signal
		signal1.set(10);
		flush_effects();
		assert_eq!(*sum.borrow(), 12);

		// Change second signal
		signal2.set(20);
		flush_effects();
		assert_eq!(*sum.borrow(), 30);

		// Change both; the effect is queued once and runs once per flush
		signal1.set(100);
		signal2.set(200);
		flush_effects();
		assert_eq!(*sum.borrow(), 300);
	}

	#[test]
	#[serial]
	fn test_effect_dispose() {
		let signal = Signal::new(0);
		let run_count = Rc::new(RefCell::new(0));
		let run_count_clone = run_count.clone();

		let signal_clone = signal.clone();
		let effect = Effect::new(move || {
			let _ = signal_clone.get();
			*run_count_clone.borrow_mut() += 1;
		});

		assert_eq!(*run_count.borrow(), 1);

		// Dispose the effect
		effect.dispose();

		// Signal change should not trigger the effect
		signal.set(10);
		flush_effects();
		assert_eq!(*run_count.borrow(), 1); // Still 1, not 2
	}

	#[test]
	#[serial]
	fn test_effect_drop_cleans_up() {
		let signal = Signal::new(0);
		let run_count = Rc::new(RefCell::new(0));
		let run_count_clone = run_count.clone();

		{
			let signal_clone = signal.clone();
			let _effect = Effect::new(move || {
				let _ = signal_clone.get();
				*run_count_clone.borrow_mut() += 1;
			});

			assert_eq!(*run_count.borrow(), 1);
		} // Effect dropped here

		// Signal change should not trigger the dropped effect
		signal.set(10);
		flush_effects();
		assert_eq!(*run_count.borrow(), 1); // Still 1
	}
}
