use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use mailroom_domain::{mailbox::Mailbox, session::SessionId, thread};
use mailroom_storage::{emails, labels};

use crate::{EmailSummary, Error, MailService, Result, views};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailboxResponse {
	pub mailbox: String,
	pub items: Vec<EmailSummary>,
}

impl MailService {
	pub async fn list_mailbox(
		&self,
		session: &SessionId,
		mailbox: Mailbox,
	) -> Result<MailboxResponse> {
		if let Mailbox::Label(label_id) = mailbox
			&& !labels::label_exists(&self.db.pool, session, label_id).await?
		{
			return Err(Error::NotFound { message: "Label not found.".to_string() });
		}

		let now = OffsetDateTime::now_utc();
		let rows = emails::list_mailbox(
			&self.db.pool,
			session,
			mailbox,
			now,
			i64::from(self.cfg.mailbox.page_size),
		)
		.await?;
		let fetched = rows.len();
		let rows = thread::collapse_threads(rows);

		tracing::debug!(%mailbox, fetched, threads = rows.len(), "Mailbox listed.");

		Ok(MailboxResponse { mailbox: mailbox.to_string(), items: views::summarize(rows, now) })
	}
}
