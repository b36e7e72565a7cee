use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use mailroom_domain::{
	fts::{self, MAX_QUERY_CHARS, SEARCH_PAGE_SIZE},
	session::SessionId,
	thread,
};

use crate::{EmailSummary, Error, MailService, Result, views};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
	#[serde(rename = "q")]
	pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
	pub items: Vec<EmailSummary>,
}

impl MailService {
	/// Prefix-matches every term of the query against the session's mail, newest first, one row
	/// per thread.
	///
	/// A query with no terms returns nothing without touching storage.
	pub async fn search(&self, session: &SessionId, req: SearchRequest) -> Result<SearchResponse> {
		let chars = req.query.chars().count();

		if chars == 0 || chars > MAX_QUERY_CHARS {
			return Err(Error::InvalidRequest {
				message: format!("q must be between 1 and {MAX_QUERY_CHARS} characters."),
			});
		}

		let expression = fts::prefix_expression(&req.query);

		if expression.is_empty() {
			tracing::debug!("Search query has no terms. Skipping storage.");

			return Ok(SearchResponse { items: Vec::new() });
		}

		let mut rows = self.search_backend.search(session, &expression, SEARCH_PAGE_SIZE).await?;
		let fetched = rows.len();

		rows.truncate(SEARCH_PAGE_SIZE as usize);

		let rows = thread::collapse_threads(rows);

		tracing::debug!(
			terms = fts::terms(&req.query).count(),
			fetched,
			threads = rows.len(),
			"Search completed."
		);

		Ok(SearchResponse { items: views::summarize(rows, OffsetDateTime::now_utc()) })
	}
}
