//! Free-text query to PostgreSQL `to_tsquery` expression.
//!
//! Terms are passed through verbatim. Characters with meaning in the tsquery grammar
//! (`&`, `|`, `!`, `(`, `)`, `:`) are not escaped, so such a term can widen the match or make
//! the backend reject the expression. Callers surface that rejection as a storage error.

/// Hard cap on rows returned by a search.
pub const SEARCH_PAGE_SIZE: i64 = 50;
/// Longest accepted raw query, in characters.
pub const MAX_QUERY_CHARS: usize = 500;

const PREFIX_MARKER: &str = ":*";
const AND: &str = " & ";

/// Whitespace-separated search terms, in input order.
pub fn terms(raw: &str) -> impl Iterator<Item = &str> {
	raw.split_whitespace()
}

/// Canonical spelling of a query: terms joined by single spaces.
pub fn normalize_whitespace(raw: &str) -> String {
	terms(raw).collect::<Vec<_>>().join(" ")
}

/// Builds `term1:* & term2:* & ...`.
///
/// Returns an empty string when the input has no terms. An empty expression means "do not
/// search"; it must never be sent to the backend.
pub fn prefix_expression(raw: &str) -> String {
	let mut out = String::new();

	for term in terms(raw) {
		if !out.is_empty() {
			out.push_str(AND);
		}

		out.push_str(term);
		out.push_str(PREFIX_MARKER);
	}

	out
}
