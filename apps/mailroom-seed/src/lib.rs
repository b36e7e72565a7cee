pub mod plan;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;
use time::{Duration, OffsetDateTime};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use mailroom_domain::{
	message::{self, SNIPPET_CHARS},
	session::SessionId,
};
use mailroom_storage::{
	db::Db,
	emails, labels,
	models::{Contact, FlagPatch, Label, NewEmail},
	sessions,
};

use crate::plan::{DEMO_CONTACTS, DEMO_LABELS, ThreadPlan};

#[derive(Debug, Parser)]
#[command(
	version = mailroom_cli::VERSION,
	rename_all = "kebab",
	styles = mailroom_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Session to fill. A fresh one is generated and printed when omitted.
	#[arg(long, value_name = "ID")]
	pub session: Option<String>,
	#[arg(long, value_name = "N", default_value_t = 24)]
	pub threads: u32,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = mailroom_config::load(&args.config)?;
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	let session = match args.session.as_deref() {
		Some(raw) => SessionId::parse(raw).ok_or_else(|| {
			eyre::eyre!("--session must be 1-{} characters of [A-Za-z0-9_-].", SessionId::MAX_LEN)
		})?,
		None => SessionId::generate(),
	};
	let db = Db::connect(&config.storage.postgres).await?;

	db.ensure_schema().await?;

	let now = OffsetDateTime::now_utc();
	let expires_at = now + Duration::days(i64::from(config.session.max_age_days));

	sessions::register_session(&db.pool, &session, now, expires_at).await?;

	let me = sessions::self_contact(&db.pool, &session)
		.await?
		.ok_or_else(|| eyre::eyre!("Session has no self contact after registration."))?;
	let mut contacts = Vec::with_capacity(DEMO_CONTACTS.len());

	for (name, email) in DEMO_CONTACTS {
		contacts.push(sessions::upsert_contact(&db.pool, &session, name, email, None).await?);
	}

	let demo_labels = ensure_labels(&db, &session).await?;

	for index in 0..args.threads {
		let plan = plan::plan_thread(index, now);

		write_thread(&db, &session, &me, &contacts, &demo_labels, &plan).await?;
	}

	tracing::info!(threads = args.threads, contacts = contacts.len(), "Seeding finished.");

	println!("{session}");

	Ok(())
}

async fn ensure_labels(db: &Db, session: &SessionId) -> color_eyre::Result<Vec<Label>> {
	let mut out = Vec::with_capacity(DEMO_LABELS.len());

	for (name, color, label_type) in DEMO_LABELS {
		match labels::insert_label(&db.pool, session, name, color, label_type).await {
			Ok(label) => out.push(label),
			Err(mailroom_storage::Error::Conflict(_)) => {
				let existing = labels::list_labels(&db.pool, session)
					.await?
					.into_iter()
					.find(|label| label.name == name)
					.ok_or_else(|| eyre::eyre!("Label {name:?} conflicted but was not found."))?;

				out.push(existing);
			},
			Err(err) => return Err(err.into()),
		}
	}

	Ok(out)
}

async fn write_thread(
	db: &Db,
	session: &SessionId,
	me: &Contact,
	contacts: &[Contact],
	demo_labels: &[Label],
	plan: &ThreadPlan,
) -> color_eyre::Result<()> {
	let thread_id = Uuid::new_v4();
	let contact = &contacts[plan.contact_index % contacts.len()];
	let mut first_email = None;

	for message in &plan.messages {
		let (sender, recipient) = if message.from_self { (me, contact) } else { (contact, me) };
		let email_id = Uuid::new_v4();
		let snippet = message::make_snippet(&message.body, SNIPPET_CHARS);

		emails::insert_email(
			&db.pool,
			&NewEmail {
				email_id,
				session_id: session.as_str(),
				thread_id,
				sender_id: sender.contact_id,
				recipient_id: Some(recipient.contact_id),
				subject: &message.subject,
				snippet: &snippet,
				body: &message.body,
				sent_at: message.sent_at,
				is_read: message.read,
				is_starred: plan.starred,
				is_important: plan.important,
				is_draft: message.draft,
				is_spam: plan.spam,
				is_archived: plan.archived,
			},
		)
		.await?;

		first_email.get_or_insert(email_id);
	}

	let Some(first_email) = first_email else {
		return Ok(());
	};

	if plan.trash {
		emails::update_flags(
			&db.pool,
			session,
			first_email,
			FlagPatch { trash: Some(true), ..Default::default() },
		)
		.await?;
	}
	if let Some(label_index) = plan.label_index
		&& let Some(label) = demo_labels.get(label_index % demo_labels.len().max(1))
	{
		labels::attach_label(&db.pool, session, first_email, label.label_id).await?;
	}
	if let Some(until) = plan.snoozed_until {
		emails::set_thread_snooze(&db.pool, session, thread_id, Some(until)).await?;
	}

	Ok(())
}
