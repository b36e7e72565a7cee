//! Deterministic demo threads. The same index always yields the same thread shape.

use time::{Duration, OffsetDateTime};

use mailroom_storage::labels::{LABEL_TYPE_SYSTEM, LABEL_TYPE_USER};

pub const DEMO_CONTACTS: [(&str, &str); 6] = [
	("Ada Lovelace", "ada@analytical.example"),
	("Grace Hopper", "grace@navy.example"),
	("Alan Turing", "alan@bletchley.example"),
	("Katherine Johnson", "katherine@nasa.example"),
	("Linus Torvalds", "linus@kernel.example"),
	("Margaret Hamilton", "margaret@apollo.example"),
];

pub const DEMO_LABELS: [(&str, &str, &str); 5] = [
	("Work", "#1a73e8", LABEL_TYPE_SYSTEM),
	("Personal", "#0b8043", LABEL_TYPE_SYSTEM),
	("Finance", "#f4b400", LABEL_TYPE_USER),
	("Travel", "#8e24aa", LABEL_TYPE_USER),
	("Receipts", "#e67c73", LABEL_TYPE_USER),
];

const SUBJECTS: [&str; 10] = [
	"Quarterly planning notes",
	"Invoice for March",
	"Flight itinerary",
	"Code review feedback",
	"Lunch on Thursday?",
	"Conference talk draft",
	"Team offsite agenda",
	"Your receipt",
	"Weekend hiking plans",
	"Budget approval needed",
];

const BODIES: [&str; 6] = [
	"Hi, sharing the latest numbers before our meeting. Let me know if anything looks off.",
	"Thanks for the quick turnaround. I left a few comments inline, nothing blocking.",
	"Attached is the document we discussed. Happy to walk through it tomorrow morning.",
	"Could you confirm the dates when you get a chance? I want to book things this week.",
	"Following up on the thread below. Any update on the timeline?",
	"Sounds good to me. See you there!",
];

pub const MAX_MESSAGES_PER_THREAD: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePlan {
	pub subject: String,
	pub body: String,
	pub sent_at: OffsetDateTime,
	pub from_self: bool,
	pub read: bool,
	pub draft: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadPlan {
	pub contact_index: usize,
	/// Oldest first.
	pub messages: Vec<MessagePlan>,
	pub starred: bool,
	pub important: bool,
	pub spam: bool,
	pub archived: bool,
	pub trash: bool,
	pub label_index: Option<usize>,
	pub snoozed_until: Option<OffsetDateTime>,
}

pub fn plan_thread(index: u32, now: OffsetDateTime) -> ThreadPlan {
	let i = index as usize;
	let count = 1 + (i * 7 + 3) % MAX_MESSAGES_PER_THREAD;
	let subject = SUBJECTS[i % SUBJECTS.len()];
	// Threads go back in time by index; the newest message of thread 0 is ten minutes old.
	let newest = now - Duration::minutes(10) - Duration::hours(i64::from(index) * 7);
	let spacing = Duration::minutes(37 + i64::from(index % 5) * 11);
	let messages = (0..count)
		.map(|m| {
			let is_last = m + 1 == count;
			let from_self = m % 2 == 1;

			MessagePlan {
				subject: if m == 0 { subject.to_string() } else { format!("Re: {subject}") },
				body: BODIES[(i + m) % BODIES.len()].to_string(),
				sent_at: newest - spacing * (count - 1 - m) as i32,
				from_self,
				read: from_self || !is_last || i % 3 != 0,
				draft: from_self && is_last && i % 10 == 7,
			}
		})
		.collect();

	ThreadPlan {
		contact_index: i % DEMO_CONTACTS.len(),
		messages,
		starred: i % 5 == 0,
		important: i % 4 == 1,
		spam: i % 11 == 10,
		archived: i % 9 == 8,
		trash: i % 13 == 12,
		label_index: (i % 3 == 0).then_some(i / 3),
		snoozed_until: (i % 8 == 6).then(|| now + Duration::hours(i64::from(index % 4) + 1)),
	}
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use crate::plan::{MAX_MESSAGES_PER_THREAD, plan_thread};

	#[test]
	fn threads_hold_one_to_four_messages() {
		let now = datetime!(2024-06-01 12:00 UTC);
		let counts = (0..40).map(|i| plan_thread(i, now).messages.len()).collect::<Vec<_>>();

		assert!(counts.iter().all(|count| (1..=MAX_MESSAGES_PER_THREAD).contains(count)));

		for expected in 1..=MAX_MESSAGES_PER_THREAD {
			assert!(counts.contains(&expected), "No thread with {expected} messages.");
		}
	}

	#[test]
	fn plans_are_deterministic() {
		let now = datetime!(2024-06-01 12:00 UTC);

		assert_eq!(plan_thread(17, now), plan_thread(17, now));
	}

	#[test]
	fn messages_are_oldest_first_and_in_the_past() {
		let now = datetime!(2024-06-01 12:00 UTC);

		for index in 0..40 {
			let plan = plan_thread(index, now);

			assert!(plan.messages.windows(2).all(|pair| pair[0].sent_at < pair[1].sent_at));
			assert!(plan.messages.iter().all(|message| message.sent_at < now));
		}
	}

	#[test]
	fn only_own_messages_become_drafts() {
		let now = datetime!(2024-06-01 12:00 UTC);

		for index in 0..40 {
			let plan = plan_thread(index, now);

			assert!(plan.messages.iter().filter(|message| message.draft).all(|message| message.from_self));
		}
	}
}
