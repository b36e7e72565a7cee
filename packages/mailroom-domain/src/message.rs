/// Preview length shown in mailbox rows.
pub const SNIPPET_CHARS: usize = 120;

/// Loose `local@domain.tld` check. Transport is out of scope, so this only catches typos.
pub fn is_plausible_address(raw: &str) -> bool {
	let Some((local, domain)) = raw.split_once('@') else {
		return false;
	};

	!local.is_empty()
		&& !domain.is_empty()
		&& !domain.contains('@')
		&& !raw.chars().any(char::is_whitespace)
		&& domain.split('.').count() >= 2
		&& domain.split('.').all(|part| !part.is_empty())
}

/// First `max_chars` characters of `body` with whitespace runs collapsed to single spaces.
pub fn make_snippet(body: &str, max_chars: usize) -> String {
	let mut out = String::new();
	let mut taken = 0;

	for word in body.split_whitespace() {
		if taken >= max_chars {
			break;
		}
		if !out.is_empty() {
			out.push(' ');

			taken += 1;
		}

		for ch in word.chars() {
			if taken >= max_chars {
				break;
			}

			out.push(ch);

			taken += 1;
		}
	}

	out.truncate(out.trim_end().len());

	out
}

/// Display name for a recipient typed as a bare address.
pub fn name_from_address(address: &str) -> &str {
	address.split_once('@').map(|(local, _)| local).unwrap_or(address)
}
