mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Compose, Config, Mailbox, Postgres, Service, Session, Storage};

use std::{fs, path::Path};

pub const MAX_MAILBOX_PAGE_SIZE: u32 = 200;
pub const MAX_SESSION_AGE_DAYS: u32 = 400;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.session.cookie_name.is_empty() {
		return Err(Error::Validation {
			message: "session.cookie_name must be non-empty.".to_string(),
		});
	}
	if !cfg.session.cookie_name.bytes().all(is_cookie_token_byte) {
		return Err(Error::Validation {
			message: "session.cookie_name must only contain cookie token characters.".to_string(),
		});
	}
	if !(1..=MAX_SESSION_AGE_DAYS).contains(&cfg.session.max_age_days) {
		return Err(Error::Validation {
			message: format!("session.max_age_days must be in the range 1-{MAX_SESSION_AGE_DAYS}."),
		});
	}
	if !(1..=MAX_MAILBOX_PAGE_SIZE).contains(&cfg.mailbox.page_size) {
		return Err(Error::Validation {
			message: format!("mailbox.page_size must be in the range 1-{MAX_MAILBOX_PAGE_SIZE}."),
		});
	}

	for (label, value) in [
		("compose.max_subject_chars", cfg.compose.max_subject_chars),
		("compose.max_body_chars", cfg.compose.max_body_chars),
	] {
		if value == 0 {
			return Err(Error::Validation { message: format!("{label} must be greater than zero.") });
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.session.cookie_name.trim();

	if trimmed.len() != cfg.session.cookie_name.len() {
		cfg.session.cookie_name = trimmed.to_string();
	}
}

// RFC 6265 token: visible ASCII minus separators.
fn is_cookie_token_byte(byte: u8) -> bool {
	byte.is_ascii_graphic()
		&& !matches!(
			byte,
			b'(' | b')'
				| b'<' | b'>'
				| b'@' | b',' | b';'
				| b':' | b'\\'
				| b'"' | b'/' | b'['
				| b']' | b'?' | b'='
				| b'{' | b'}'
		)
}
