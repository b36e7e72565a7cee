use sqlx::PgPool;
use uuid::Uuid;

use mailroom_domain::session::SessionId;

use crate::{Error, Result, models::Label};

pub const LABEL_TYPE_SYSTEM: &str = "system";
pub const LABEL_TYPE_USER: &str = "user";

pub async fn list_labels(pool: &PgPool, session: &SessionId) -> Result<Vec<Label>> {
	let labels = sqlx::query_as(
		"\
SELECT label_id, name, color, label_type
FROM labels
WHERE session_id = $1
ORDER BY label_type = 'user', name",
	)
	.bind(session.as_str())
	.fetch_all(pool)
	.await?;

	Ok(labels)
}

pub async fn insert_label(
	pool: &PgPool,
	session: &SessionId,
	name: &str,
	color: &str,
	label_type: &str,
) -> Result<Label> {
	let result = sqlx::query_as(
		"\
INSERT INTO labels (label_id, session_id, name, color, label_type)
VALUES ($1, $2, $3, $4, $5)
RETURNING label_id, name, color, label_type",
	)
	.bind(Uuid::new_v4())
	.bind(session.as_str())
	.bind(name)
	.bind(color)
	.bind(label_type)
	.fetch_one(pool)
	.await;

	match result {
		Ok(label) => Ok(label),
		Err(sqlx::Error::Database(err)) if err.is_unique_violation() =>
			Err(Error::Conflict(format!("Label {name:?} already exists."))),
		Err(err) => Err(err.into()),
	}
}

pub async fn label_exists(pool: &PgPool, session: &SessionId, label_id: Uuid) -> Result<bool> {
	let found: Option<i32> =
		sqlx::query_scalar("SELECT 1 FROM labels WHERE session_id = $1 AND label_id = $2")
			.bind(session.as_str())
			.bind(label_id)
			.fetch_optional(pool)
			.await?;

	Ok(found.is_some())
}

/// Attaches a label to an email when both belong to the session. Attaching twice is a no-op.
pub async fn attach_label(
	pool: &PgPool,
	session: &SessionId,
	email_id: Uuid,
	label_id: Uuid,
) -> Result<u64> {
	let result = sqlx::query(
		"\
INSERT INTO email_labels (email_id, label_id)
SELECT e.email_id, l.label_id
FROM emails e
JOIN labels l ON l.session_id = e.session_id
WHERE e.session_id = $1 AND e.email_id = $2 AND l.label_id = $3
ON CONFLICT DO NOTHING",
	)
	.bind(session.as_str())
	.bind(email_id)
	.bind(label_id)
	.execute(pool)
	.await?;

	Ok(result.rows_affected())
}

pub async fn detach_label(
	pool: &PgPool,
	session: &SessionId,
	email_id: Uuid,
	label_id: Uuid,
) -> Result<u64> {
	let result = sqlx::query(
		"\
DELETE FROM email_labels el
USING emails e
WHERE el.email_id = e.email_id
	AND e.session_id = $1
	AND el.email_id = $2
	AND el.label_id = $3",
	)
	.bind(session.as_str())
	.bind(email_id)
	.bind(label_id)
	.execute(pool)
	.await?;

	Ok(result.rows_affected())
}
