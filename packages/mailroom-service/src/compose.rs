use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use mailroom_domain::{
	message::{self, SNIPPET_CHARS},
	session::SessionId,
};
use mailroom_storage::{emails, models::NewEmail, sessions};

use crate::{Error, MailService, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeRequest {
	pub to: String,
	#[serde(default)]
	pub to_name: Option<String>,
	pub subject: String,
	pub body: String,
	/// Replies carry the thread they answer. New conversations leave it empty.
	#[serde(default)]
	pub thread_id: Option<Uuid>,
	#[serde(default)]
	pub draft: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeResponse {
	pub email_id: Uuid,
	pub thread_id: Uuid,
	pub draft: bool,
}

impl MailService {
	/// Stores an outgoing message (or draft) from the session's own address. Nothing is delivered.
	pub async fn send(&self, session: &SessionId, req: ComposeRequest) -> Result<ComposeResponse> {
		let to = req.to.trim();

		if !message::is_plausible_address(to) {
			return Err(Error::InvalidRequest {
				message: "to must be an email address.".to_string(),
			});
		}

		let max_subject = self.cfg.compose.max_subject_chars as usize;

		if req.subject.chars().count() > max_subject {
			return Err(Error::InvalidRequest {
				message: format!("subject must be at most {max_subject} characters."),
			});
		}

		let max_body = self.cfg.compose.max_body_chars as usize;

		if req.body.chars().count() > max_body {
			return Err(Error::InvalidRequest {
				message: format!("body must be at most {max_body} characters."),
			});
		}
		if let Some(thread_id) = req.thread_id
			&& !emails::thread_exists(&self.db.pool, session, thread_id).await?
		{
			return Err(Error::NotFound { message: "Thread not found.".to_string() });
		}

		let sender = self.ensure_session(session).await?;
		let name = req
			.to_name
			.as_deref()
			.map(str::trim)
			.filter(|name| !name.is_empty())
			.unwrap_or_else(|| message::name_from_address(to));
		let recipient = sessions::upsert_contact(&self.db.pool, session, name, to, None).await?;
		let email_id = Uuid::new_v4();
		let thread_id = req.thread_id.unwrap_or_else(Uuid::new_v4);
		let snippet = message::make_snippet(&req.body, SNIPPET_CHARS);

		emails::insert_email(
			&self.db.pool,
			&NewEmail {
				email_id,
				session_id: session.as_str(),
				thread_id,
				sender_id: sender.contact_id,
				recipient_id: Some(recipient.contact_id),
				subject: req.subject.trim(),
				snippet: &snippet,
				body: &req.body,
				sent_at: OffsetDateTime::now_utc(),
				is_read: true,
				is_starred: false,
				is_important: false,
				is_draft: req.draft,
				is_spam: false,
				is_archived: false,
			},
		)
		.await?;

		tracing::info!(%email_id, %thread_id, draft = req.draft, "Message stored.");

		Ok(ComposeResponse { email_id, thread_id, draft: req.draft })
	}
}
