use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Opaque per-browser identifier. The only tenancy boundary in the system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);
impl SessionId {
	pub const MAX_LEN: usize = 128;

	/// Accepts 1-128 ASCII alphanumerics, `-` or `_`. Anything else is treated as no session.
	pub fn parse(raw: &str) -> Option<Self> {
		let valid = !raw.is_empty()
			&& raw.len() <= Self::MAX_LEN
			&& raw.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_');

		valid.then(|| Self(raw.to_string()))
	}

	pub fn generate() -> Self {
		Self(Uuid::new_v4().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SessionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
