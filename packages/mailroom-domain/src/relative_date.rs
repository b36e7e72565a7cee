use time::{
	OffsetDateTime,
	format_description::BorrowedFormatItem,
	macros::format_description,
};

const TIME_OF_DAY: &[BorrowedFormatItem<'_>] =
	format_description!("[hour repr:12 padding:none]:[minute] [period]");
const MONTH_DAY: &[BorrowedFormatItem<'_>] =
	format_description!("[month repr:short] [day padding:none]");
const NUMERIC_DATE: &[BorrowedFormatItem<'_>] =
	format_description!("[month padding:none]/[day padding:none]/[year repr:last_two]");

/// Formats `sent_at` the way a mailbox row shows it, relative to `now`.
///
/// Same calendar day gives `3:07 PM`, same year gives `Mar 4`, anything else `3/4/23`. Both
/// timestamps are compared in `now`'s offset.
pub fn format_relative(sent_at: OffsetDateTime, now: OffsetDateTime) -> String {
	let sent_at = sent_at.to_offset(now.offset());
	let description = if sent_at.date() == now.date() {
		TIME_OF_DAY
	} else if sent_at.year() == now.year() {
		MONTH_DAY
	} else {
		NUMERIC_DATE
	};

	sent_at.format(description).unwrap_or_else(|_| sent_at.date().to_string())
}
