//! Cookie-backed sessions.
//!
//! Every routed request passes through [`session_middleware`], which guarantees a [`SessionId`]
//! in the request extensions. Handlers read it with the [`Session`] extractor.

use axum::{
	extract::{FromRequestParts, Request, State},
	http::{HeaderMap, HeaderValue, header, request::Parts},
	middleware::Next,
	response::{IntoResponse, Response},
};

use mailroom_domain::session::SessionId;
use mailroom_service::Error;

use crate::{routes::ApiError, state::AppState};

const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Debug, Clone)]
pub struct Session(pub SessionId);
impl<S> FromRequestParts<S> for Session
where
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		parts
			.extensions
			.get::<SessionId>()
			.cloned()
			.map(Self)
			.ok_or_else(|| ApiError::from(Error::MissingSession))
	}
}

/// Reuses the session named by the cookie, or issues and registers a fresh one.
pub async fn session_middleware(
	State(state): State<AppState>,
	mut req: Request,
	next: Next,
) -> Response {
	let cfg = &state.service.cfg.session;
	let existing = read_session_cookie(req.headers(), &cfg.cookie_name);
	let issued = existing.is_none();
	let session = existing.unwrap_or_else(SessionId::generate);

	if issued {
		if let Err(err) = state.service.register_session(&session).await {
			return ApiError::from(err).into_response();
		}

		tracing::debug!("Issued a new session.");
	}

	req.extensions_mut().insert(session.clone());

	let mut response = next.run(req).await;

	if issued {
		let cookie =
			set_cookie_value(&cfg.cookie_name, &session, cfg.max_age_days, cfg.secure_cookie);

		match HeaderValue::from_str(&cookie) {
			Ok(value) => {
				response.headers_mut().append(header::SET_COOKIE, value);
			},
			Err(err) => tracing::error!(error = %err, "Failed to encode the session cookie."),
		}
	}

	response
}

/// First valid session id carried under `name` in any `Cookie` header.
pub fn read_session_cookie(headers: &HeaderMap, name: &str) -> Option<SessionId> {
	headers
		.get_all(header::COOKIE)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(|value| value.split(';'))
		.filter_map(|pair| pair.trim().split_once('='))
		.filter(|(key, _)| *key == name)
		.find_map(|(_, value)| SessionId::parse(value.trim_matches('"')))
}

pub fn set_cookie_value(
	name: &str,
	session: &SessionId,
	max_age_days: u32,
	secure: bool,
) -> String {
	let max_age = u64::from(max_age_days) * SECONDS_PER_DAY;
	let mut cookie = format!("{name}={session}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Lax");

	if secure {
		cookie.push_str("; Secure");
	}

	cookie
}
