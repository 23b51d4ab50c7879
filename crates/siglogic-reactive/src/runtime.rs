//! Reactive Runtime
//!
//! This module provides the core reactive runtime for managing signal
//! dependencies, memo invalidation, and effect scheduling.
//!
//! ## Architecture
//!
//! The reactive system is based on a pull-based reactivity model similar to
//! Leptos and Solid.js:
//!
//! 1. **Observer Stack**: Tracks the currently executing Effect or Memo
//! 2. **Dependency Tracking**: Automatically records dependencies when
//!    `Signal::get()` is called
//! 3. **Memo Invalidation**: Marks dependent memos dirty when a signal
//!    changes; dirtiness propagates through chains of memos
//! 4. **Effect Scheduling**: Immediate effects run synchronously, deferred
//!    effects queue until [`flush_effects`](crate::flush_effects)
//!
//! ## Example
//!
//! ```ignore
//! use siglogic_reactive::{Signal, Effect};
//!
//! let count = Signal::new(0);
//!
//! // Create an effect that automatically tracks dependencies
//! Effect::new(move || {
//!     // This get() call automatically registers the dependency
//!     println!("Count is: {}", count.get());
//! });
//!
//! // Update the signal - the effect will automatically re-run
//! count.set(42);
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

/// Unique identifier for reactive nodes (Signals, Effects, Memos)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Create a new unique NodeId
	pub fn new() -> Self {
		static COUNTER: AtomicUsize = AtomicUsize::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

/// Type of reactive node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
	/// A Signal node (source of reactivity)
	Signal,
	/// An Effect node (side effect that runs when dependencies change)
	Effect,
	/// A Memo node (cached computation)
	Memo,
}

/// Effect execution timing.
///
/// Determines when an effect re-runs after a dependency change:
/// - Immediate effects run synchronously at notification time
/// - Deferred effects queue until the next [`flush_effects`](crate::flush_effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectTiming {
	/// Runs synchronously when a dependency changes
	Immediate,
	/// Queues until the pending-effect queue is flushed
	#[default]
	Deferred,
}

/// Observer represents a currently executing Effect or Memo
#[derive(Debug, Clone, Copy)]
pub struct Observer {
	/// Unique identifier for this observer
	pub id: NodeId,
	/// Type of this observer
	pub node_type: NodeType,
}

/// Dependency graph node
#[derive(Debug, Default)]
pub(crate) struct DependencyNode {
	/// IDs of nodes that depend on this node
	pub(crate) subscribers: Vec<NodeId>,
	/// IDs of nodes this node depends on
	pub(crate) dependencies: Vec<NodeId>,
}

/// Global reactive runtime
///
/// This struct manages the reactive dependency graph and the pending-effect
/// queue. It uses thread-local storage to maintain separate runtime state per
/// thread, so each thread gets an independent reactive world.
pub struct Runtime {
	/// Observer stack for tracking currently executing effects and memos
	observer_stack: RefCell<Vec<Observer>>,
	/// Dependency graph: NodeId -> DependencyNode
	pub(crate) dependency_graph: RefCell<BTreeMap<NodeId, DependencyNode>>,
	/// Deferred effects waiting for the next flush
	pub(crate) pending_effects: RefCell<Vec<NodeId>>,
}

impl Runtime {
	/// Create a new Runtime instance
	pub fn new() -> Self {
		Self {
			observer_stack: RefCell::new(Vec::new()),
			dependency_graph: RefCell::new(BTreeMap::new()),
			pending_effects: RefCell::new(Vec::new()),
		}
	}

	/// Get the current observer (the currently executing Effect or Memo)
	pub fn current_observer(&self) -> Option<NodeId> {
		self.observer_stack
			.borrow()
			.last()
			.map(|observer| observer.id)
	}

	/// Push an observer onto the stack
	///
	/// This should be called when starting to execute an Effect or Memo.
	pub fn push_observer(&self, observer: Observer) {
		self.observer_stack.borrow_mut().push(observer);
	}

	/// Pop an observer from the stack
	///
	/// This should be called when finishing execution of an Effect or Memo.
	pub fn pop_observer(&self) -> Option<Observer> {
		self.observer_stack.borrow_mut().pop()
	}

	/// Track a dependency between the current observer and a reactive node
	///
	/// This is called automatically when `Signal::get()` or `Memo::get()` is
	/// invoked.
	///
	/// # Arguments
	///
	/// * `source_id` - ID of the node being accessed
	pub fn track_dependency(&self, source_id: NodeId) {
		if let Some(observer_id) = self.current_observer() {
			trace!(?source_id, ?observer_id, "tracking dependency");
			let mut graph = self.dependency_graph.borrow_mut();

			// Add source -> observer edge (source has a new subscriber)
			let source_node = graph.entry(source_id).or_default();
			if !source_node.subscribers.contains(&observer_id) {
				source_node.subscribers.push(observer_id);
			}

			// Add observer -> source edge (observer depends on source)
			let observer_node = graph.entry(observer_id).or_default();
			if !observer_node.dependencies.contains(&source_id) {
				observer_node.dependencies.push(source_id);
			}
		}
	}

	/// Notify that a reactive node has changed
	///
	/// Subscribing memos are marked dirty synchronously; a memo that
	/// transitions from clean to dirty is itself stale for its own
	/// subscribers, so the notification propagates through memo chains.
	/// Immediate effects run synchronously, deferred effects are queued.
	///
	/// # Arguments
	///
	/// * `source_id` - ID of the node that changed
	pub fn notify_change(&self, source_id: NodeId) {
		let subscribers = {
			let graph = self.dependency_graph.borrow();
			match graph.get(&source_id) {
				Some(node) => node.subscribers.clone(),
				None => return,
			}
		};
		trace!(?source_id, count = subscribers.len(), "notifying subscribers");

		let mut immediate_effects = Vec::new();
		let mut deferred_effects = Vec::new();
		let mut dirtied_memos = Vec::new();

		for &subscriber_id in &subscribers {
			// Effects carry timing information; everything else that reacts
			// to invalidation is a memo.
			if let Some(timing) = crate::effect::get_effect_timing(subscriber_id) {
				match timing {
					EffectTiming::Immediate => immediate_effects.push(subscriber_id),
					EffectTiming::Deferred => deferred_effects.push(subscriber_id),
				}
			} else if crate::memo::invalidate(subscriber_id) {
				dirtied_memos.push(subscriber_id);
			}
		}

		// Dirtiness propagates before any effect runs, so effects always
		// observe fresh derived values. Propagation stops at memos that were
		// already dirty: their subscribers were notified when they first went
		// dirty.
		for memo_id in dirtied_memos {
			self.notify_change(memo_id);
		}

		for effect_id in immediate_effects {
			crate::effect::Effect::execute_effect(effect_id);
		}

		for effect_id in deferred_effects {
			self.schedule_effect(effect_id);
		}
	}

	/// Queue a deferred effect for the next flush
	///
	/// # Arguments
	///
	/// * `effect_id` - ID of the effect to queue
	pub fn schedule_effect(&self, effect_id: NodeId) {
		let mut pending = self.pending_effects.borrow_mut();
		if !pending.contains(&effect_id) {
			pending.push(effect_id);
		}
	}

	/// Clear dependencies for a node
	///
	/// This should be called before re-executing an Effect/Memo so the
	/// dependency set is collected from scratch.
	///
	/// # Arguments
	///
	/// * `node_id` - ID of the node whose dependencies should be cleared
	pub fn clear_dependencies(&self, node_id: NodeId) {
		let mut graph = self.dependency_graph.borrow_mut();

		// Get the current dependencies
		if let Some(node) = graph.get(&node_id) {
			let dependencies = node.dependencies.clone();

			// Remove this node from all source subscriber lists
			for &dep_id in &dependencies {
				if let Some(dep_node) = graph.get_mut(&dep_id) {
					dep_node.subscribers.retain(|&id| id != node_id);
				}
			}
		}

		// Clear the dependencies list
		if let Some(node) = graph.get_mut(&node_id) {
			node.dependencies.clear();
		}
	}

	/// Remove a node from the dependency graph
	///
	/// This should be called when a Signal/Effect/Memo is dropped.
	///
	/// # Arguments
	///
	/// * `node_id` - ID of the node to remove
	pub fn remove_node(&self, node_id: NodeId) {
		self.clear_dependencies(node_id);
		self.dependency_graph.borrow_mut().remove(&node_id);
	}

	/// Check if a node exists in the dependency graph (for testing)
	pub fn has_node(&self, node_id: NodeId) -> bool {
		self.dependency_graph.borrow().contains_key(&node_id)
	}

	/// Get the number of subscribers for a node (for testing)
	pub fn subscriber_count(&self, node_id: NodeId) -> usize {
		self.dependency_graph
			.borrow()
			.get(&node_id)
			.map(|node| node.subscribers.len())
			.unwrap_or(0)
	}
}

impl Default for Runtime {
	fn default() -> Self {
		Self::new()
	}
}

// Thread-local runtime instance
//
// Each thread gets its own runtime, so reactive graphs never cross threads.
thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Get a reference to the current thread's runtime
///
/// # Example
///
/// ```ignore
/// use siglogic_reactive::runtime::with_runtime;
///
/// with_runtime(|rt| {
///     rt.track_dependency(source_id);
/// });
/// ```
pub fn with_runtime<F, R>(f: F) -> R
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.with(f)
}

/// Try to access the current thread's runtime (safe version for Drop implementations)
///
/// Returns None if the thread-local storage has been destroyed.
pub(crate) fn try_with_runtime<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.try_with(f).ok()
}
