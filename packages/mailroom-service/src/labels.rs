use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mailroom_domain::{
	label::{self, MAX_LABEL_NAME_CHARS},
	session::SessionId,
};
use mailroom_storage::{emails, labels};

use crate::{Error, LabelView, MailService, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLabelRequest {
	pub name: String,
	pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsResponse {
	pub items: Vec<LabelView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelChangeResponse {
	pub email_id: Uuid,
	pub label_id: Uuid,
	/// False when the email already was in the requested state.
	pub changed: bool,
}

impl MailService {
	pub async fn list_labels(&self, session: &SessionId) -> Result<LabelsResponse> {
		let items = labels::list_labels(&self.db.pool, session)
			.await?
			.into_iter()
			.map(LabelView::from)
			.collect();

		Ok(LabelsResponse { items })
	}

	pub async fn create_label(
		&self,
		session: &SessionId,
		req: CreateLabelRequest,
	) -> Result<LabelView> {
		let name = req.name.trim();
		let name_chars = name.chars().count();

		if name_chars == 0 || name_chars > MAX_LABEL_NAME_CHARS {
			return Err(Error::InvalidRequest {
				message: format!("name must be between 1 and {MAX_LABEL_NAME_CHARS} characters."),
			});
		}

		let color = req.color.trim();

		if !label::is_hex_color(color) {
			return Err(Error::InvalidRequest {
				message: "color must be a #RRGGBB hex value.".to_string(),
			});
		}

		self.ensure_session(session).await?;

		let created =
			labels::insert_label(&self.db.pool, session, name, color, labels::LABEL_TYPE_USER)
				.await?;

		Ok(created.into())
	}

	pub async fn add_label(
		&self,
		session: &SessionId,
		email_id: Uuid,
		label_id: Uuid,
	) -> Result<LabelChangeResponse> {
		self.ensure_label_target(session, email_id, label_id).await?;

		let attached = labels::attach_label(&self.db.pool, session, email_id, label_id).await?;

		Ok(LabelChangeResponse { email_id, label_id, changed: attached > 0 })
	}

	pub async fn remove_label(
		&self,
		session: &SessionId,
		email_id: Uuid,
		label_id: Uuid,
	) -> Result<LabelChangeResponse> {
		self.ensure_label_target(session, email_id, label_id).await?;

		let detached = labels::detach_label(&self.db.pool, session, email_id, label_id).await?;

		Ok(LabelChangeResponse { email_id, label_id, changed: detached > 0 })
	}

	async fn ensure_label_target(
		&self,
		session: &SessionId,
		email_id: Uuid,
		label_id: Uuid,
	) -> Result<()> {
		if !emails::email_exists(&self.db.pool, session, email_id).await? {
			return Err(Error::NotFound { message: "Email not found.".to_string() });
		}
		if !labels::label_exists(&self.db.pool, session, label_id).await? {
			return Err(Error::NotFound { message: "Label not found.".to_string() });
		}

		Ok(())
	}
}
