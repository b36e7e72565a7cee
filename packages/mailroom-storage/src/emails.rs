use std::collections::HashMap;

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use mailroom_domain::{mailbox::Mailbox, session::SessionId};

use crate::{
	Result,
	models::{
		EmailLabelRow, EmailRecord, EmailRow, FlagPatch, Label, NewEmail, ThreadMessage,
		ThreadMessageRow,
	},
};

const EMAIL_COLUMNS: &str = "\
	e.email_id,
	e.thread_id,
	e.subject,
	e.snippet,
	e.sent_at,
	e.is_read,
	e.is_starred,
	e.is_important,
	e.is_draft,
	e.is_trash,
	e.is_spam,
	e.is_archived,
	e.snoozed_until,
	c.contact_id,
	c.name,
	c.email,
	c.is_self,
	c.avatar_url";
const EMAIL_FROM: &str = "FROM emails e JOIN contacts c ON c.contact_id = e.sender_id";

/// Full-text search over one session's mail.
///
/// `expression` must be a non-empty `to_tsquery` expression. Trash and spam are always excluded,
/// rows come back newest first, at most `limit` of them.
pub async fn search_emails(
	pool: &PgPool,
	session: &SessionId,
	expression: &str,
	limit: i64,
) -> Result<Vec<EmailRecord>> {
	let sql = format!(
		"\
SELECT
{EMAIL_COLUMNS}
{EMAIL_FROM}
WHERE e.session_id = $1
	AND e.is_trash = false
	AND e.is_spam = false
	AND e.fts @@ to_tsquery('english', $2)
ORDER BY e.sent_at DESC, e.email_id
LIMIT $3"
	);
	let rows: Vec<EmailRow> = sqlx::query_as(&sql)
		.bind(session.as_str())
		.bind(expression)
		.bind(limit)
		.fetch_all(pool)
		.await?;

	attach_labels(pool, rows).await
}

pub async fn list_mailbox(
	pool: &PgPool,
	session: &SessionId,
	mailbox: Mailbox,
	now: OffsetDateTime,
	limit: i64,
) -> Result<Vec<EmailRecord>> {
	let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {EMAIL_COLUMNS} {EMAIL_FROM}"));

	builder.push(" WHERE e.session_id = ");
	builder.push_bind(session.as_str());

	push_mailbox_filter(&mut builder, mailbox, now);

	builder.push(" ORDER BY e.sent_at DESC, e.email_id LIMIT ");
	builder.push_bind(limit);

	let rows: Vec<EmailRow> = builder.build_query_as().fetch_all(pool).await?;

	attach_labels(pool, rows).await
}

/// Every message in a thread, oldest first.
pub async fn thread_messages(
	pool: &PgPool,
	session: &SessionId,
	thread_id: Uuid,
) -> Result<Vec<ThreadMessage>> {
	let sql = format!(
		"\
SELECT
{EMAIL_COLUMNS},
	e.body
{EMAIL_FROM}
WHERE e.session_id = $1 AND e.thread_id = $2
ORDER BY e.sent_at ASC, e.email_id"
	);
	let rows: Vec<ThreadMessageRow> = sqlx::query_as(&sql)
		.bind(session.as_str())
		.bind(thread_id)
		.fetch_all(pool)
		.await?;
	let mut bodies = HashMap::with_capacity(rows.len());
	let mut email_rows = Vec::with_capacity(rows.len());

	for ThreadMessageRow { row, body } in rows {
		bodies.insert(row.email_id, body);
		email_rows.push(row);
	}

	let records = attach_labels(pool, email_rows).await?;

	Ok(records
		.into_iter()
		.map(|record| {
			let body = bodies.remove(&record.email.email_id).unwrap_or_default();

			ThreadMessage { record, body }
		})
		.collect())
}

pub async fn insert_email<'e, E>(executor: E, email: &NewEmail<'_>) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO emails (
	email_id,
	session_id,
	thread_id,
	sender_id,
	recipient_id,
	subject,
	snippet,
	body,
	sent_at,
	is_read,
	is_starred,
	is_important,
	is_draft,
	is_spam,
	is_archived
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15)",
	)
	.bind(email.email_id)
	.bind(email.session_id)
	.bind(email.thread_id)
	.bind(email.sender_id)
	.bind(email.recipient_id)
	.bind(email.subject)
	.bind(email.snippet)
	.bind(email.body)
	.bind(email.sent_at)
	.bind(email.is_read)
	.bind(email.is_starred)
	.bind(email.is_important)
	.bind(email.is_draft)
	.bind(email.is_spam)
	.bind(email.is_archived)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn thread_exists(pool: &PgPool, session: &SessionId, thread_id: Uuid) -> Result<bool> {
	let found: Option<i32> = sqlx::query_scalar(
		"SELECT 1 FROM emails WHERE session_id = $1 AND thread_id = $2 LIMIT 1",
	)
	.bind(session.as_str())
	.bind(thread_id)
	.fetch_optional(pool)
	.await?;

	Ok(found.is_some())
}

pub async fn email_exists(pool: &PgPool, session: &SessionId, email_id: Uuid) -> Result<bool> {
	let found: Option<i32> =
		sqlx::query_scalar("SELECT 1 FROM emails WHERE session_id = $1 AND email_id = $2")
			.bind(session.as_str())
			.bind(email_id)
			.fetch_optional(pool)
			.await?;

	Ok(found.is_some())
}

/// Applies `patch` to one email. Returns the number of rows touched.
pub async fn update_flags(
	pool: &PgPool,
	session: &SessionId,
	email_id: Uuid,
	patch: FlagPatch,
) -> Result<u64> {
	let result = sqlx::query(
		"\
UPDATE emails
SET
	is_read = COALESCE($3, is_read),
	is_starred = COALESCE($4, is_starred),
	is_important = COALESCE($5, is_important),
	is_trash = COALESCE($6, is_trash),
	is_spam = COALESCE($7, is_spam)
WHERE session_id = $1 AND email_id = $2",
	)
	.bind(session.as_str())
	.bind(email_id)
	.bind(patch.read)
	.bind(patch.starred)
	.bind(patch.important)
	.bind(patch.trash)
	.bind(patch.spam)
	.execute(pool)
	.await?;

	Ok(result.rows_affected())
}

pub async fn set_thread_archived(
	pool: &PgPool,
	session: &SessionId,
	thread_id: Uuid,
	archived: bool,
) -> Result<u64> {
	let result = sqlx::query(
		"UPDATE emails SET is_archived = $3 WHERE session_id = $1 AND thread_id = $2",
	)
	.bind(session.as_str())
	.bind(thread_id)
	.bind(archived)
	.execute(pool)
	.await?;

	Ok(result.rows_affected())
}

pub async fn set_thread_read(
	pool: &PgPool,
	session: &SessionId,
	thread_id: Uuid,
	read: bool,
) -> Result<u64> {
	let result =
		sqlx::query("UPDATE emails SET is_read = $3 WHERE session_id = $1 AND thread_id = $2")
			.bind(session.as_str())
			.bind(thread_id)
			.bind(read)
			.execute(pool)
			.await?;

	Ok(result.rows_affected())
}

/// Sets or clears (`None`) the snooze deadline on every message of a thread.
pub async fn set_thread_snooze(
	pool: &PgPool,
	session: &SessionId,
	thread_id: Uuid,
	until: Option<OffsetDateTime>,
) -> Result<u64> {
	let result = sqlx::query(
		"UPDATE emails SET snoozed_until = $3 WHERE session_id = $1 AND thread_id = $2",
	)
	.bind(session.as_str())
	.bind(thread_id)
	.bind(until)
	.execute(pool)
	.await?;

	Ok(result.rows_affected())
}

fn push_mailbox_filter(
	builder: &mut QueryBuilder<'_, Postgres>,
	mailbox: Mailbox,
	now: OffsetDateTime,
) {
	match mailbox {
		Mailbox::Inbox => {
			builder.push(
				" AND e.is_archived = false AND e.is_trash = false AND e.is_spam = false \
				 AND e.is_draft = false AND c.is_self = false \
				 AND (e.snoozed_until IS NULL OR e.snoozed_until <= ",
			);
			builder.push_bind(now);
			builder.push(")");
		},
		Mailbox::Starred => {
			builder.push(" AND e.is_starred = true AND e.is_trash = false AND e.is_spam = false");
		},
		Mailbox::Important => {
			builder.push(" AND e.is_important = true AND e.is_trash = false AND e.is_spam = false");
		},
		Mailbox::Snoozed => {
			builder.push(" AND e.is_trash = false AND e.snoozed_until > ");
			builder.push_bind(now);
		},
		Mailbox::Sent => {
			builder.push(" AND c.is_self = true AND e.is_draft = false AND e.is_trash = false");
		},
		Mailbox::Drafts => {
			builder.push(" AND e.is_draft = true AND e.is_trash = false");
		},
		Mailbox::All => {
			builder.push(" AND e.is_trash = false AND e.is_spam = false");
		},
		Mailbox::Spam => {
			builder.push(" AND e.is_spam = true");
		},
		Mailbox::Trash => {
			builder.push(" AND e.is_trash = true");
		},
		Mailbox::Label(label_id) => {
			builder.push(
				" AND e.is_trash = false AND e.is_spam = false \
				 AND EXISTS (SELECT 1 FROM email_labels el WHERE el.email_id = e.email_id AND el.label_id = ",
			);
			builder.push_bind(label_id);
			builder.push(")");
		},
	}
}

async fn attach_labels(pool: &PgPool, rows: Vec<EmailRow>) -> Result<Vec<EmailRecord>> {
	if rows.is_empty() {
		return Ok(Vec::new());
	}

	let email_ids = rows.iter().map(|row| row.email_id).collect::<Vec<_>>();
	let label_rows: Vec<EmailLabelRow> = sqlx::query_as(
		"\
SELECT el.email_id, l.label_id, l.name, l.color, l.label_type
FROM email_labels el
JOIN labels l ON l.label_id = el.label_id
WHERE el.email_id = ANY($1)
ORDER BY l.name",
	)
	.bind(email_ids.as_slice())
	.fetch_all(pool)
	.await?;
	let mut by_email: HashMap<Uuid, Vec<Label>> = HashMap::new();

	for EmailLabelRow { email_id, label } in label_rows {
		by_email.entry(email_id).or_default().push(label);
	}

	Ok(rows
		.into_iter()
		.map(|email| {
			let labels = by_email.remove(&email.email_id).unwrap_or_default();

			EmailRecord { email, labels }
		})
		.collect())
}
