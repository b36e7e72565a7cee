use time::OffsetDateTime;
use uuid::Uuid;

use mailroom_domain::thread::Threaded;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Contact {
	pub contact_id: Uuid,
	pub name: String,
	pub email: String,
	pub is_self: bool,
	pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Label {
	pub label_id: Uuid,
	pub name: String,
	pub color: String,
	pub label_type: String,
}

/// One email joined with its sender contact.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EmailRow {
	pub email_id: Uuid,
	pub thread_id: Uuid,
	pub subject: String,
	pub snippet: String,
	pub sent_at: OffsetDateTime,
	pub is_read: bool,
	pub is_starred: bool,
	pub is_important: bool,
	pub is_draft: bool,
	pub is_trash: bool,
	pub is_spam: bool,
	pub is_archived: bool,
	pub snoozed_until: Option<OffsetDateTime>,
	#[sqlx(flatten)]
	pub sender: Contact,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EmailLabelRow {
	pub(crate) email_id: Uuid,
	#[sqlx(flatten)]
	pub(crate) label: Label,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ThreadMessageRow {
	#[sqlx(flatten)]
	pub(crate) row: EmailRow,
	pub(crate) body: String,
}

/// An email with its sender and every label attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecord {
	pub email: EmailRow,
	pub labels: Vec<Label>,
}
impl Threaded for EmailRecord {
	type ThreadId = Uuid;

	fn thread_id(&self) -> &Self::ThreadId {
		&self.email.thread_id
	}
}

#[derive(Debug, Clone)]
pub struct ThreadMessage {
	pub record: EmailRecord,
	pub body: String,
}

#[derive(Debug)]
pub struct NewEmail<'a> {
	pub email_id: Uuid,
	pub session_id: &'a str,
	pub thread_id: Uuid,
	pub sender_id: Uuid,
	pub recipient_id: Option<Uuid>,
	pub subject: &'a str,
	pub snippet: &'a str,
	pub body: &'a str,
	pub sent_at: OffsetDateTime,
	pub is_read: bool,
	pub is_starred: bool,
	pub is_important: bool,
	pub is_draft: bool,
	pub is_spam: bool,
	pub is_archived: bool,
}

/// Partial flag update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagPatch {
	pub read: Option<bool>,
	pub starred: Option<bool>,
	pub important: Option<bool>,
	pub trash: Option<bool>,
	pub spam: Option<bool>,
}
impl FlagPatch {
	pub fn is_empty(&self) -> bool {
		self.read.is_none()
			&& self.starred.is_none()
			&& self.important.is_none()
			&& self.trash.is_none()
			&& self.spam.is_none()
	}
}
