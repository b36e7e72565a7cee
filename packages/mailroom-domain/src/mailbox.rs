use std::{fmt, str::FromStr};

use uuid::Uuid;

const LABEL_PREFIX: &str = "label:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mailbox {
	Inbox,
	Starred,
	Important,
	Snoozed,
	Sent,
	Drafts,
	All,
	Spam,
	Trash,
	Label(Uuid),
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown mailbox: {0}.")]
pub struct UnknownMailbox(pub String);

impl FromStr for Mailbox {
	type Err = UnknownMailbox;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let mailbox = match raw {
			"inbox" => Self::Inbox,
			"starred" => Self::Starred,
			"important" => Self::Important,
			"snoozed" => Self::Snoozed,
			"sent" => Self::Sent,
			"drafts" => Self::Drafts,
			"all" => Self::All,
			"spam" => Self::Spam,
			"trash" => Self::Trash,
			other => {
				let label_id = other
					.strip_prefix(LABEL_PREFIX)
					.and_then(|id| Uuid::parse_str(id).ok())
					.ok_or_else(|| UnknownMailbox(raw.to_string()))?;

				Self::Label(label_id)
			},
		};

		Ok(mailbox)
	}
}

impl fmt::Display for Mailbox {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Inbox => f.write_str("inbox"),
			Self::Starred => f.write_str("starred"),
			Self::Important => f.write_str("important"),
			Self::Snoozed => f.write_str("snoozed"),
			Self::Sent => f.write_str("sent"),
			Self::Drafts => f.write_str("drafts"),
			Self::All => f.write_str("all"),
			Self::Spam => f.write_str("spam"),
			Self::Trash => f.write_str("trash"),
			Self::Label(id) => write!(f, "{LABEL_PREFIX}{id}"),
		}
	}
}
