pub mod actions;
pub mod compose;
pub mod labels;
pub mod mailbox;
pub mod search;
pub mod threads;
pub mod time_serde;
pub mod views;

mod error;

pub use actions::{
	EmailActionResponse, FlagsRequest, MarkReadRequest, SnoozeRequest, ThreadActionResponse,
};
pub use compose::{ComposeRequest, ComposeResponse};
pub use error::{Error, Result};
pub use labels::{CreateLabelRequest, LabelChangeResponse, LabelsResponse};
pub use mailbox::MailboxResponse;
pub use search::{SearchRequest, SearchResponse};
pub use threads::{ThreadMessageView, ThreadResponse};
pub use views::{ContactView, EmailFlags, EmailSummary, LabelView};

use std::{future::Future, pin::Pin, sync::Arc};

use sqlx::PgPool;
use time::{Duration, OffsetDateTime};

use mailroom_config::Config;
use mailroom_domain::session::SessionId;
use mailroom_storage::{
	db::Db,
	emails,
	models::{Contact, EmailRecord},
	sessions,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Full-text retrieval behind [`MailService::search`].
///
/// Implementations must honor the whole filter: the session, no trash, no spam, and the
/// expression match. Rows come back newest first, at most `limit` of them.
pub trait SearchBackend
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		session: &'a SessionId,
		expression: &'a str,
		limit: i64,
	) -> BoxFuture<'a, mailroom_storage::Result<Vec<EmailRecord>>>;
}

pub struct MailService {
	pub cfg: Config,
	pub db: Db,
	pub search_backend: Arc<dyn SearchBackend>,
}

struct PgSearch {
	pool: PgPool,
}

impl SearchBackend for PgSearch {
	fn search<'a>(
		&'a self,
		session: &'a SessionId,
		expression: &'a str,
		limit: i64,
	) -> BoxFuture<'a, mailroom_storage::Result<Vec<EmailRecord>>> {
		Box::pin(emails::search_emails(&self.pool, session, expression, limit))
	}
}

impl MailService {
	pub fn new(cfg: Config, db: Db) -> Self {
		let search_backend = Arc::new(PgSearch { pool: db.pool.clone() });

		Self { cfg, db, search_backend }
	}

	pub fn with_search_backend(
		cfg: Config,
		db: Db,
		search_backend: Arc<dyn SearchBackend>,
	) -> Self {
		Self { cfg, db, search_backend }
	}

	/// Records the session and its self contact, pushing the expiry out by the cookie lifetime.
	pub async fn register_session(&self, session: &SessionId) -> Result<()> {
		let now = OffsetDateTime::now_utc();
		let expires_at = now + Duration::days(i64::from(self.cfg.session.max_age_days));

		sessions::register_session(&self.db.pool, session, now, expires_at).await?;

		Ok(())
	}

	/// Returns the session's self contact, registering the session first when the cookie
	/// outlived its storage rows.
	pub(crate) async fn ensure_session(&self, session: &SessionId) -> Result<Contact> {
		if let Some(contact) = sessions::self_contact(&self.db.pool, session).await? {
			return Ok(contact);
		}

		self.register_session(session).await?;

		sessions::self_contact(&self.db.pool, session).await?.ok_or_else(|| Error::Storage {
			message: "Self contact is missing after session registration.".to_string(),
		})
	}
}
