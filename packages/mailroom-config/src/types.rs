use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub session: Session,
	#[serde(default)]
	pub mailbox: Mailbox,
	#[serde(default)]
	pub compose: Compose,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
	pub cookie_name: String,
	pub max_age_days: u32,
	/// Adds the `Secure` attribute to issued cookies. Leave off for plain-HTTP local runs.
	#[serde(default)]
	pub secure_cookie: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mailbox {
	/// Rows fetched per mailbox listing before threads are collapsed.
	pub page_size: u32,
}
impl Default for Mailbox {
	fn default() -> Self {
		Self { page_size: 50 }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Compose {
	pub max_subject_chars: u32,
	pub max_body_chars: u32,
}
impl Default for Compose {
	fn default() -> Self {
		Self { max_subject_chars: 255, max_body_chars: 100_000 }
	}
}
