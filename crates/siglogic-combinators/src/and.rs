use siglogic_reactive::Memo;

use crate::source::ReadSignal;

/// Computes the logical conjunction of the provided boolean sources.
///
/// The derived value is true when every source currently evaluates to true.
/// Sources are read in slice order and evaluation stops at the first false.
/// With no sources the result is vacuously true.
///
/// # Example
///
/// ```ignore
/// let logged_in = Signal::new(true);
/// let verified = Signal::new(false);
///
/// let can_post = and(&[logged_in.clone(), verified.clone()]);
/// assert!(!can_post.get());
///
/// verified.set(true);
/// assert!(can_post.get());
/// ```
pub fn and<S>(sources: &[S]) -> Memo<bool>
where
	S: ReadSignal<bool> + Clone + 'static,
{
	let sources = sources.to_vec();
	Memo::new(move || sources.iter().all(|source| source.get()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use siglogic_reactive::Signal;

	#[rstest]
	#[serial]
	fn test_and_true_when_every_source_is_true() {
		let a = Signal::new(true);
		let b = Signal::new(true);

		let result = and(&[a, b]);
		assert!(result.get());
	}

	#[rstest]
	#[serial]
	fn test_and_false_when_any_source_is_false() {
		let a = Signal::new(true);
		let b = Signal::new(false);
		let result = and(&[a.clone(), b.clone()]);

		assert!(!result.get());

		b.set(true);
		assert!(result.get());

		a.set(false);
		assert!(!result.get());
	}

	#[rstest]
	#[serial]
	fn test_and_vacuously_true_without_sources() {
		let result = and::<Signal<bool>>(&[]);
		assert!(result.get());
	}
}
