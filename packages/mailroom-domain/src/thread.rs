//! Collapsing message rows into one row per conversation.

use std::{collections::HashSet, hash::Hash};

/// A row that belongs to a conversation.
pub trait Threaded {
	type ThreadId: Clone + Eq + Hash;

	fn thread_id(&self) -> &Self::ThreadId;
}

/// Keeps the first row seen for each thread and drops the rest.
///
/// Surviving rows keep their relative order, so the output lists threads in the order they first
/// appear in `rows`. Whether "first" means newest or oldest is decided by whoever ordered the
/// input.
pub fn collapse_threads<T>(mut rows: Vec<T>) -> Vec<T>
where
	T: Threaded,
{
	let mut seen = HashSet::with_capacity(rows.len());

	rows.retain(|row| seen.insert(row.thread_id().clone()));

	rows
}
