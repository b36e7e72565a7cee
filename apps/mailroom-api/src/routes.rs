use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::StatusCode,
	middleware,
	response::{IntoResponse, Response},
	routing::{get, patch, post},
};
use serde::Serialize;
use uuid::Uuid;

use mailroom_domain::mailbox::Mailbox;
use mailroom_service::{
	ComposeRequest, ComposeResponse, CreateLabelRequest, EmailActionResponse, Error,
	FlagsRequest, LabelChangeResponse, LabelView, LabelsResponse, MailboxResponse,
	MarkReadRequest, SearchRequest, SearchResponse, SnoozeRequest, ThreadActionResponse,
	ThreadResponse,
};

use crate::{
	session::{Session, session_middleware},
	state::AppState,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn router(state: AppState) -> Router {
	let sessioned = Router::new()
		.route("/v1/search", get(search))
		.route("/v1/mailboxes/{mailbox}", get(list_mailbox))
		.route("/v1/threads/{thread_id}", get(get_thread))
		.route("/v1/threads/{thread_id}/archive", post(archive_thread))
		.route("/v1/threads/{thread_id}/unarchive", post(unarchive_thread))
		.route("/v1/threads/{thread_id}/read", post(mark_thread_read))
		.route("/v1/threads/{thread_id}/snooze", post(snooze_thread).delete(unsnooze_thread))
		.route("/v1/emails", post(send))
		.route("/v1/emails/{email_id}/flags", patch(update_flags))
		.route("/v1/emails/{email_id}/labels/{label_id}", post(add_label).delete(remove_label))
		.route("/v1/labels", get(list_labels).post(create_label))
		.route_layer(middleware::from_fn_with_state(state.clone(), session_middleware));

	Router::new().route("/health", get(health)).merge(sessioned).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Session(session): Session,
	query: Result<Query<SearchRequest>, QueryRejection>,
) -> ApiResult<SearchResponse> {
	let Query(req) = query?;
	let response = state.service.search(&session, req).await?;

	Ok(Json(response))
}

async fn list_mailbox(
	State(state): State<AppState>,
	Session(session): Session,
	Path(mailbox): Path<String>,
) -> ApiResult<MailboxResponse> {
	let mailbox = mailbox.parse::<Mailbox>().map_err(Error::from)?;
	let response = state.service.list_mailbox(&session, mailbox).await?;

	Ok(Json(response))
}

async fn get_thread(
	State(state): State<AppState>,
	Session(session): Session,
	thread_id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<ThreadResponse> {
	let Path(thread_id) = thread_id?;
	let response = state.service.get_thread(&session, thread_id).await?;

	Ok(Json(response))
}

async fn archive_thread(
	State(state): State<AppState>,
	Session(session): Session,
	thread_id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<ThreadActionResponse> {
	let Path(thread_id) = thread_id?;
	let response = state.service.archive_thread(&session, thread_id).await?;

	Ok(Json(response))
}

async fn unarchive_thread(
	State(state): State<AppState>,
	Session(session): Session,
	thread_id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<ThreadActionResponse> {
	let Path(thread_id) = thread_id?;
	let response = state.service.unarchive_thread(&session, thread_id).await?;

	Ok(Json(response))
}

async fn mark_thread_read(
	State(state): State<AppState>,
	Session(session): Session,
	thread_id: Result<Path<Uuid>, PathRejection>,
	payload: Result<Json<MarkReadRequest>, JsonRejection>,
) -> ApiResult<ThreadActionResponse> {
	let Path(thread_id) = thread_id?;
	let Json(req) = payload?;
	let response = state.service.mark_thread_read(&session, thread_id, req).await?;

	Ok(Json(response))
}

async fn snooze_thread(
	State(state): State<AppState>,
	Session(session): Session,
	thread_id: Result<Path<Uuid>, PathRejection>,
	payload: Result<Json<SnoozeRequest>, JsonRejection>,
) -> ApiResult<ThreadActionResponse> {
	let Path(thread_id) = thread_id?;
	let Json(req) = payload?;
	let response = state.service.snooze_thread(&session, thread_id, req).await?;

	Ok(Json(response))
}

async fn unsnooze_thread(
	State(state): State<AppState>,
	Session(session): Session,
	thread_id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<ThreadActionResponse> {
	let Path(thread_id) = thread_id?;
	let response = state.service.unsnooze_thread(&session, thread_id).await?;

	Ok(Json(response))
}

async fn send(
	State(state): State<AppState>,
	Session(session): Session,
	payload: Result<Json<ComposeRequest>, JsonRejection>,
) -> ApiResult<ComposeResponse> {
	let Json(req) = payload?;
	let response = state.service.send(&session, req).await?;

	Ok(Json(response))
}

async fn update_flags(
	State(state): State<AppState>,
	Session(session): Session,
	email_id: Result<Path<Uuid>, PathRejection>,
	payload: Result<Json<FlagsRequest>, JsonRejection>,
) -> ApiResult<EmailActionResponse> {
	let Path(email_id) = email_id?;
	let Json(req) = payload?;
	let response = state.service.update_flags(&session, email_id, req).await?;

	Ok(Json(response))
}

async fn add_label(
	State(state): State<AppState>,
	Session(session): Session,
	ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> ApiResult<LabelChangeResponse> {
	let Path((email_id, label_id)) = ids?;
	let response = state.service.add_label(&session, email_id, label_id).await?;

	Ok(Json(response))
}

async fn remove_label(
	State(state): State<AppState>,
	Session(session): Session,
	ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> ApiResult<LabelChangeResponse> {
	let Path((email_id, label_id)) = ids?;
	let response = state.service.remove_label(&session, email_id, label_id).await?;

	Ok(Json(response))
}

async fn list_labels(
	State(state): State<AppState>,
	Session(session): Session,
) -> ApiResult<LabelsResponse> {
	let response = state.service.list_labels(&session).await?;

	Ok(Json(response))
}

async fn create_label(
	State(state): State<AppState>,
	Session(session): Session,
	payload: Result<Json<CreateLabelRequest>, JsonRejection>,
) -> ApiResult<LabelView> {
	let Json(req) = payload?;
	let response = state.service.create_label(&session, req).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::MissingSession => {
				tracing::error!("Request reached a handler without a session.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"SESSION_MISSING",
					"Session is missing.",
					None,
				)
			},
			Error::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			Error::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			Error::Conflict { message } =>
				json_error(StatusCode::CONFLICT, "CONFLICT", message, None),
			Error::Storage { message } => {
				tracing::error!(error = %message, "Storage error.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"STORAGE_ERROR",
					"Internal error.",
					None,
				)
			},
		}
	}
}

impl From<QueryRejection> for ApiError {
	fn from(err: QueryRejection) -> Self {
		json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.body_text(), None)
	}
}

impl From<PathRejection> for ApiError {
	fn from(err: PathRejection) -> Self {
		json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.body_text(), None)
	}
}

impl From<JsonRejection> for ApiError {
	fn from(err: JsonRejection) -> Self {
		json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.body_text(), None)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}
