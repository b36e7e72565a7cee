pub const MAX_LABEL_NAME_CHARS: usize = 64;

/// `#RRGGBB`, either case.
pub fn is_hex_color(raw: &str) -> bool {
	raw.len() == 7
		&& raw.starts_with('#')
		&& raw.bytes().skip(1).all(|byte| byte.is_ascii_hexdigit())
}
