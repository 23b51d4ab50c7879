use siglogic_reactive::Memo;

use crate::source::ReadSignal;

/// Computes whether the provided source's current value matches the supplied
/// predicate.
///
/// The predicate is expected to be pure; this is not enforced. If the
/// predicate panics for some value, the panic propagates to whoever reads the
/// derived value at that time.
///
/// # Example
///
/// ```ignore
/// let count = Signal::new(1);
/// let is_even = pr(&count, |value| value % 2 == 0);
///
/// assert!(!is_even.get());
///
/// count.set(2);
/// assert!(is_even.get());
/// ```
pub fn pr<T, S, P>(source: &S, predicate: P) -> Memo<bool>
where
	T: 'static,
	S: ReadSignal<T> + Clone + 'static,
	P: Fn(&T) -> bool + 'static,
{
	let source = source.clone();
	Memo::new(move || predicate(&source.get()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use siglogic_reactive::Signal;

	#[rstest]
	#[serial]
	fn test_pr_matches_the_current_value() {
		let count = Signal::new(1);
		let is_even = pr(&count, |value| value % 2 == 0);

		assert!(!is_even.get());

		count.set(2);
		assert!(is_even.get());
	}

	#[rstest]
	#[serial]
	fn test_pr_over_non_boolean_values() {
		let name = Signal::new(String::from("sig"));
		let is_long = pr(&name, |value: &String| value.len() > 5);

		assert!(!is_long.get());

		name.set(String::from("siglogic"));
		assert!(is_long.get());
	}

	#[rstest]
	#[serial]
	fn test_pr_panic_propagates_to_the_reader() {
		let count = Signal::new(1);
		let checked = pr(&count, |value| {
			if *value == 0 {
				panic!("zero is not allowed");
			}
			*value > 0
		});

		assert!(checked.get());

		count.set(0);
		let result =
			std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| checked.get()));
		assert!(result.is_err());
	}
}
