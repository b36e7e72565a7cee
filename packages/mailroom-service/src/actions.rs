use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use mailroom_domain::session::SessionId;
use mailroom_storage::{emails, models::FlagPatch};

use crate::{Error, MailService, Result};

/// Flags to change on one email. Omitted fields keep their stored value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FlagsRequest {
	#[serde(default)]
	pub read: Option<bool>,
	#[serde(default)]
	pub starred: Option<bool>,
	#[serde(default)]
	pub important: Option<bool>,
	#[serde(default)]
	pub trash: Option<bool>,
	#[serde(default)]
	pub spam: Option<bool>,
}
impl From<FlagsRequest> for FlagPatch {
	fn from(req: FlagsRequest) -> Self {
		Self {
			read: req.read,
			starred: req.starred,
			important: req.important,
			trash: req.trash,
			spam: req.spam,
		}
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkReadRequest {
	pub read: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SnoozeRequest {
	#[serde(with = "crate::time_serde")]
	pub until: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailActionResponse {
	pub email_id: Uuid,
	pub updated: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadActionResponse {
	pub thread_id: Uuid,
	pub updated: u64,
}

impl MailService {
	pub async fn update_flags(
		&self,
		session: &SessionId,
		email_id: Uuid,
		req: FlagsRequest,
	) -> Result<EmailActionResponse> {
		let patch = FlagPatch::from(req);

		if patch.is_empty() {
			return Err(Error::InvalidRequest {
				message: "At least one flag must be provided.".to_string(),
			});
		}

		let updated = emails::update_flags(&self.db.pool, session, email_id, patch).await?;

		if updated == 0 {
			return Err(Error::NotFound { message: "Email not found.".to_string() });
		}

		Ok(EmailActionResponse { email_id, updated })
	}

	pub async fn archive_thread(
		&self,
		session: &SessionId,
		thread_id: Uuid,
	) -> Result<ThreadActionResponse> {
		let updated = emails::set_thread_archived(&self.db.pool, session, thread_id, true).await?;

		thread_updated(thread_id, updated)
	}

	pub async fn unarchive_thread(
		&self,
		session: &SessionId,
		thread_id: Uuid,
	) -> Result<ThreadActionResponse> {
		let updated = emails::set_thread_archived(&self.db.pool, session, thread_id, false).await?;

		thread_updated(thread_id, updated)
	}

	pub async fn mark_thread_read(
		&self,
		session: &SessionId,
		thread_id: Uuid,
		req: MarkReadRequest,
	) -> Result<ThreadActionResponse> {
		let updated = emails::set_thread_read(&self.db.pool, session, thread_id, req.read).await?;

		thread_updated(thread_id, updated)
	}

	/// Hides the thread from the inbox until `until`, which must lie in the future.
	pub async fn snooze_thread(
		&self,
		session: &SessionId,
		thread_id: Uuid,
		req: SnoozeRequest,
	) -> Result<ThreadActionResponse> {
		if req.until <= OffsetDateTime::now_utc() {
			return Err(Error::InvalidRequest {
				message: "until must be in the future.".to_string(),
			});
		}

		let updated =
			emails::set_thread_snooze(&self.db.pool, session, thread_id, Some(req.until)).await?;

		thread_updated(thread_id, updated)
	}

	pub async fn unsnooze_thread(
		&self,
		session: &SessionId,
		thread_id: Uuid,
	) -> Result<ThreadActionResponse> {
		let updated = emails::set_thread_snooze(&self.db.pool, session, thread_id, None).await?;

		thread_updated(thread_id, updated)
	}
}

fn thread_updated(thread_id: Uuid, updated: u64) -> Result<ThreadActionResponse> {
	if updated == 0 {
		return Err(Error::NotFound { message: "Thread not found.".to_string() });
	}

	Ok(ThreadActionResponse { thread_id, updated })
}
