use std::sync::Arc;

use mailroom_service::MailService;
use mailroom_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<MailService>,
}
impl AppState {
	pub async fn new(config: mailroom_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::with_service(MailService::new(config, db)))
	}

	pub fn with_service(service: MailService) -> Self {
		Self { service: Arc::new(service) }
	}
}
