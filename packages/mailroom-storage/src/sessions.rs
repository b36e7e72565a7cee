use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use mailroom_domain::session::SessionId;

use crate::{Result, models::Contact};

pub const SELF_CONTACT_NAME: &str = "Me";
pub const SELF_CONTACT_EMAIL: &str = "me@mailroom.local";

/// Creates the session row and its self contact, or extends the expiry of an existing one.
pub async fn register_session(
	pool: &PgPool,
	session: &SessionId,
	now: OffsetDateTime,
	expires_at: OffsetDateTime,
) -> Result<()> {
	let mut tx = pool.begin().await?;

	sqlx::query(
		"\
INSERT INTO sessions (session_id, created_at, expires_at)
VALUES ($1, $2, $3)
ON CONFLICT (session_id) DO UPDATE SET expires_at = EXCLUDED.expires_at",
	)
	.bind(session.as_str())
	.bind(now)
	.bind(expires_at)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"\
INSERT INTO contacts (contact_id, session_id, name, email, is_self, avatar_url)
VALUES ($1, $2, $3, $4, true, NULL)
ON CONFLICT DO NOTHING",
	)
	.bind(Uuid::new_v4())
	.bind(session.as_str())
	.bind(SELF_CONTACT_NAME)
	.bind(SELF_CONTACT_EMAIL)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

pub async fn self_contact(pool: &PgPool, session: &SessionId) -> Result<Option<Contact>> {
	let contact = sqlx::query_as(
		"\
SELECT contact_id, name, email, is_self, avatar_url
FROM contacts
WHERE session_id = $1 AND is_self",
	)
	.bind(session.as_str())
	.fetch_optional(pool)
	.await?;

	Ok(contact)
}

/// Returns the contact for `email` in this session, creating it when missing.
///
/// An existing contact keeps its stored name.
pub async fn upsert_contact(
	pool: &PgPool,
	session: &SessionId,
	name: &str,
	email: &str,
	avatar_url: Option<&str>,
) -> Result<Contact> {
	let contact = sqlx::query_as(
		"\
INSERT INTO contacts (contact_id, session_id, name, email, is_self, avatar_url)
VALUES ($1, $2, $3, $4, false, $5)
ON CONFLICT (session_id, email) DO UPDATE SET name = contacts.name
RETURNING contact_id, name, email, is_self, avatar_url",
	)
	.bind(Uuid::new_v4())
	.bind(session.as_str())
	.bind(name)
	.bind(email)
	.bind(avatar_url)
	.fetch_one(pool)
	.await?;

	Ok(contact)
}
