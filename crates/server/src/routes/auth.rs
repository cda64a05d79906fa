use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service::auth::domain::{LoginInput, ProviderSession};
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<ProviderSession>), JsonApiError> {
    let session = state.auth.login(input)?;
    let token = state.sessions.create(session.clone()).await;
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    Ok((jar.add(cookie), Json(session)))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    if let Some(c) = jar.get(SESSION_COOKIE) {
        if state.sessions.remove(c.value()).await {
            info!("provider logged out");
        }
    }
    (jar.remove(Cookie::build(SESSION_COOKIE).path("/")), StatusCode::NO_CONTENT)
}

pub async fn me(Extension(session): Extension<ProviderSession>) -> Json<ProviderSession> {
    Json(session)
}

/// Middleware: require a live session cookie; exposes the session to handlers
/// as an `Extension<ProviderSession>`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(JsonApiError::unauthorized)?;

    let session = state.sessions.get(&token).await.ok_or_else(JsonApiError::unauthorized)?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
