use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use mailroom_domain::session::SessionId;
use mailroom_storage::emails;

use crate::{EmailSummary, Error, MailService, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessageView {
	#[serde(flatten)]
	pub summary: EmailSummary,
	pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadResponse {
	pub thread_id: Uuid,
	/// Subject of the first message.
	pub subject: String,
	pub messages: Vec<ThreadMessageView>,
}

impl MailService {
	pub async fn get_thread(&self, session: &SessionId, thread_id: Uuid) -> Result<ThreadResponse> {
		let rows = emails::thread_messages(&self.db.pool, session, thread_id).await?;
		let Some(first) = rows.first() else {
			return Err(Error::NotFound { message: "Thread not found.".to_string() });
		};
		let subject = first.record.email.subject.clone();
		let now = OffsetDateTime::now_utc();
		let messages = rows
			.into_iter()
			.map(|message| ThreadMessageView {
				summary: EmailSummary::from_record(message.record, now),
				body: message.body,
			})
			.collect();

		Ok(ThreadResponse { thread_id, subject, messages })
	}
}
