use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use mailroom_domain::relative_date;
use mailroom_storage::models::{Contact, EmailRecord, Label};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactView {
	pub contact_id: Uuid,
	pub name: String,
	pub email: String,
	pub is_self: bool,
	pub avatar_url: Option<String>,
}
impl From<Contact> for ContactView {
	fn from(contact: Contact) -> Self {
		Self {
			contact_id: contact.contact_id,
			name: contact.name,
			email: contact.email,
			is_self: contact.is_self,
			avatar_url: contact.avatar_url,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelView {
	pub label_id: Uuid,
	pub name: String,
	pub color: String,
	pub label_type: String,
}
impl From<Label> for LabelView {
	fn from(label: Label) -> Self {
		Self {
			label_id: label.label_id,
			name: label.name,
			color: label.color,
			label_type: label.label_type,
		}
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmailFlags {
	pub read: bool,
	pub starred: bool,
	pub important: bool,
	pub draft: bool,
	pub trash: bool,
	pub spam: bool,
	pub archived: bool,
}

/// One mailbox or search row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSummary {
	pub email_id: Uuid,
	pub thread_id: Uuid,
	pub subject: String,
	pub snippet: String,
	#[serde(with = "crate::time_serde")]
	pub sent_at: OffsetDateTime,
	pub display_date: String,
	#[serde(with = "crate::time_serde::option")]
	pub snoozed_until: Option<OffsetDateTime>,
	pub flags: EmailFlags,
	pub sender: ContactView,
	pub labels: Vec<LabelView>,
}
impl EmailSummary {
	pub fn from_record(record: EmailRecord, now: OffsetDateTime) -> Self {
		let EmailRecord { email, labels } = record;

		Self {
			email_id: email.email_id,
			thread_id: email.thread_id,
			display_date: relative_date::format_relative(email.sent_at, now),
			subject: email.subject,
			snippet: email.snippet,
			sent_at: email.sent_at,
			snoozed_until: email.snoozed_until,
			flags: EmailFlags {
				read: email.is_read,
				starred: email.is_starred,
				important: email.is_important,
				draft: email.is_draft,
				trash: email.is_trash,
				spam: email.is_spam,
				archived: email.is_archived,
			},
			sender: email.sender.into(),
			labels: labels.into_iter().map(LabelView::from).collect(),
		}
	}
}

pub(crate) fn summarize(records: Vec<EmailRecord>, now: OffsetDateTime) -> Vec<EmailSummary> {
	records.into_iter().map(|record| EmailSummary::from_record(record, now)).collect()
}
