use siglogic_reactive::Memo;

use crate::source::ReadSignal;

/// Computes the logical negation of the provided boolean source.
pub fn not<S>(source: &S) -> Memo<bool>
where
	S: ReadSignal<bool> + Clone + 'static,
{
	let source = source.clone();
	Memo::new(move || !source.get())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use siglogic_reactive::Signal;

	#[rstest]
	#[serial]
	fn test_not_returns_the_complement() {
		let source = Signal::new(true);
		let result = not(&source);

		assert!(!result.get());

		source.set(false);
		assert!(result.get());
	}
}
