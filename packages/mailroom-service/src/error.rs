use mailroom_domain::mailbox::UnknownMailbox;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The request reached a handler without a session. Middleware always attaches one, so this
	/// is a wiring bug rather than a client mistake.
	#[error("Session is missing from the request.")]
	MissingSession,
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<mailroom_storage::Error> for Error {
	fn from(err: mailroom_storage::Error) -> Self {
		match err {
			mailroom_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			mailroom_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			mailroom_storage::Error::NotFound(message) => Self::NotFound { message },
			mailroom_storage::Error::Conflict(message) => Self::Conflict { message },
		}
	}
}

impl From<UnknownMailbox> for Error {
	fn from(err: UnknownMailbox) -> Self {
		Self::NotFound { message: err.to_string() }
	}
}
