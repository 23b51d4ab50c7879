use siglogic_reactive::Memo;

use crate::source::ReadSignal;

/// Computes the logical disjunction of the provided boolean sources.
///
/// The derived value is true when at least one source currently evaluates to
/// true. Sources are read in slice order and evaluation stops at the first
/// true. With no sources the result is vacuously false.
pub fn or<S>(sources: &[S]) -> Memo<bool>
where
	S: ReadSignal<bool> + Clone + 'static,
{
	let sources = sources.to_vec();
	Memo::new(move || sources.iter().any(|source| source.get()))
}
