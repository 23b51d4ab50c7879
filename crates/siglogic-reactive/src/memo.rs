//! Memo - Lazily Memoized Derived Values
//!
//! `Memo<T>` caches the result of a computation over other reactive values.
//! The computation re-runs only when the memo is read after one of its
//! dependencies has changed; between changes, reads return the cached value.
//!
//! ## Key Features
//!
//! - **Automatic Dependency Tracking**: Any Signal or Memo read inside the
//!   computation becomes a dependency; the set is re-collected on every run.
//! - **Lazy Recomputation**: A dependency change only marks the memo dirty.
//!   The computation runs on the next `get()`.
//! - **Composable**: A memo is itself a readable source, so memos can depend
//!   on other memos.
//!
//! ## Example
//!
//! ```ignore
//! use siglogic_reactive::{Signal, Memo};
//!
//! let count = Signal::new(2);
//!
//! let doubled = Memo::new({
//!     let count = count.clone();
//!     move || count.get() * 2
//! });
//!
//! assert_eq!(doubled.get(), 4);
//!
//! count.set(10);
//! assert_eq!(doubled.get(), 20);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::runtime::{NodeId, NodeType, Observer, try_with_runtime, with_runtime};

/// Type alias for invalidation hooks registered with the runtime.
///
/// The hook marks its memo dirty and reports whether this call transitioned
/// the memo from clean to dirty.
type InvalidateFn = Box<dyn Fn() -> bool + 'static>;

// Global registry of memo invalidation hooks
//
// The runtime consults this when a reactive node changes, so it can mark
// subscribing memos dirty without knowing their value types.
thread_local! {
	static MEMO_INVALIDATORS: RefCell<BTreeMap<NodeId, InvalidateFn>> =
		RefCell::new(BTreeMap::new());
}

/// Mark the memo with the given ID dirty.
///
/// Returns `true` when the memo transitioned from clean to dirty, `false`
/// when it was already dirty, never computed, or is not a memo at all.
pub(crate) fn invalidate(node_id: NodeId) -> bool {
	MEMO_INVALIDATORS.with(|registry| {
		registry
			.borrow()
			.get(&node_id)
			.map(|hook| hook())
			.unwrap_or(false)
	})
}

/// Shared state of a memo: cached value, dirty flag, and the computation.
struct MemoState<T> {
	/// Cached result of the last computation, `None` before the first run
	value: RefCell<Option<T>>,
	/// Whether the cached value is stale
	dirty: Cell<bool>,
	/// The computation that produces the value
	compute: RefCell<Box<dyn FnMut() -> T + 'static>>,
}

/// A memoized computation that caches its result
///
/// `Memo<T>` re-evaluates only when read after a dependency changed. Reading
/// a memo from inside an Effect or another Memo registers it as a dependency,
/// so memos compose with the rest of the reactive graph.
///
/// ## Cloning
///
/// `Memo<T>` implements `Clone`; all clones share the same cached value and
/// computation.
pub struct Memo<T: 'static> {
	/// Unique identifier for this memo
	id: NodeId,
	/// Cached value and computation, shared via reference counting
	state: Rc<MemoState<T>>,
}

impl<T: 'static> Memo<T> {
	/// Create a new Memo with the given computation
	///
	/// The computation does not run until the first `get()`.
	///
	/// # Arguments
	///
	/// * `f` - The computation. Must be `FnMut() -> T + 'static`.
	///
	/// # Example
	///
	/// ```ignore
	/// let count = Signal::new(5);
	/// let doubled = Memo::new({
	///     let count = count.clone();
	///     move || count.get() * 2
	/// });
	/// assert_eq!(doubled.get(), 10);
	/// ```
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() -> T + 'static,
	{
		let id = NodeId::new();
		let state = Rc::new(MemoState {
			value: RefCell::new(None),
			dirty: Cell::new(true),
			compute: RefCell::new(Box::new(f)),
		});

		// Register the invalidation hook. It holds a weak reference so the
		// registry never keeps the memo state alive on its own.
		let weak = Rc::downgrade(&state);
		MEMO_INVALIDATORS.with(|registry| {
			registry
				.borrow_mut()
				.insert(id, Box::new(move || invalidate_state(&weak)));
		});

		Self { id, state }
	}

	/// Get the memoized value, recomputing if a dependency changed
	///
	/// This automatically tracks the memo as a dependency if called from
	/// within an Effect or another Memo.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		with_runtime(|rt| rt.track_dependency(self.id));
		self.get_untracked()
	}

	/// Get the memoized value without registering a dependency
	///
	/// The computation still runs if the cached value is stale.
	pub fn get_untracked(&self) -> T
	where
		T: Clone,
	{
		if !self.state.dirty.get() {
			if let Some(value) = self.state.value.borrow().as_ref() {
				return value.clone();
			}
		}
		self.recompute()
	}

	/// Force the memo to recompute on its next read
	///
	/// Dependency changes mark the memo dirty automatically; this is the
	/// manual escape hatch for state the runtime cannot see.
	pub fn mark_dirty(&self) {
		self.state.dirty.set(true);
		with_runtime(|rt| rt.notify_change(self.id));
	}

	/// Get the NodeId of this memo
	///
	/// This is mainly for internal use by the runtime and tests.
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Run the computation, re-collecting dependencies from scratch.
	///
	/// Each dependency is read exactly once per pass, so the result reflects
	/// a single consistent snapshot of the inputs. A panic raised by the
	/// computation propagates unchanged to the caller.
	fn recompute(&self) -> T
	where
		T: Clone,
	{
		trace!(memo = ?self.id, "recomputing memo");
		with_runtime(|rt| {
			rt.clear_dependencies(self.id);
			rt.push_observer(Observer {
				id: self.id,
				node_type: NodeType::Memo,
			});
		});

		let value = {
			let mut compute = self.state.compute.borrow_mut();
			(&mut **compute)()
		};

		with_runtime(|rt| {
			rt.pop_observer();
		});

		*self.state.value.borrow_mut() = Some(value.clone());
		self.state.dirty.set(false);
		value
	}
}

/// Invalidation hook body: flips the dirty flag on a still-live memo state.
fn invalidate_state<T>(state: &Weak<MemoState<T>>) -> bool {
	match state.upgrade() {
		Some(state) => {
			let was_clean = !state.dirty.get() && state.value.borrow().is_some();
			state.dirty.set(true);
			was_clean
		}
		None => false,
	}
}

impl<T: 'static> Clone for Memo<T> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			state: self.state.clone(),
		}
	}
}

impl<T: 'static> Drop for Memo<T> {
	fn drop(&mut self) {
		// Only clean up when this is the last Memo clone. The invalidation
		// registry holds a weak reference, so it does not count.
		if Rc::strong_count(&self.state) == 1 {
			let _ = MEMO_INVALIDATORS.try_with(|registry| {
				registry.borrow_mut().remove(&self.id);
			});
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Memo<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Memo")
			.field("id", &self.id)
			.field("value", &self.state.value.borrow())
			.field("dirty", &self.state.dirty.get())
			.finish()
	}
}
