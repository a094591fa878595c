//! Session cookie handling: the current-user extractor and sign-out.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, State},
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, error, info, warn};

use crate::board::{User, Viewer};
use crate::web::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Read the session token from the request's `cookie` header.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|cookie| {
                cookie
                    .trim()
                    .strip_prefix(SESSION_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
            })
        })
        .filter(|token| !token.is_empty())
}

/// `Set-Cookie` value that removes the session cookie.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}=; HttpOnly{secure}; SameSite=Lax; Path=/; Max-Age=0")
}

/// Current signed-in user (if any), with the session token they came in on.
///
/// Lookup failures are logged and treated as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Viewer>);

impl MaybeUser {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref().map(|viewer| &viewer.user)
    }

    #[must_use]
    pub fn viewer(&self) -> Option<&Viewer> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);

        let (Some(backend), Some(token)) = (app.backend.as_ref(), session_token(&parts.headers))
        else {
            return Ok(Self(None));
        };

        match backend.current_user(token).await {
            Ok(user) => Ok(Self(user.map(|user| Viewer {
                user,
                access_token: token.to_string(),
            }))),
            Err(e) => {
                warn!(error = %e, "Session lookup failed");
                Ok(Self(None))
            }
        }
    }
}

/// Same-site path of the page the request came from, if any.
fn referer_path(headers: &HeaderMap) -> Option<String> {
    let referer = headers.get(header::REFERER)?.to_str().ok()?;
    if referer.starts_with('/') && !referer.starts_with("//") {
        return Some(referer.to_string());
    }
    let url = url::Url::parse(referer).ok()?;
    Some(match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    })
}

/// POST /logout - End the session.
///
/// On failure the cookie is kept and the user goes back where they came from.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(token) = session_token(&headers) else {
        debug!("Logout without a session cookie");
        return Redirect::to("/").into_response();
    };

    let result = match state.backend.as_ref() {
        Some(backend) => backend.sign_out(token).await,
        None => {
            warn!("Logout requested but no backend is configured");
            return Redirect::to(&referer_path(&headers).unwrap_or_else(|| "/".to_string()))
                .into_response();
        }
    };

    match result {
        Ok(()) => {
            info!("User signed out");
            let cookie = clear_session_cookie(state.config.cookie_secure);
            ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
        }
        Err(e) => {
            error!(error = %e, "Sign out failed");
            let back = referer_path(&headers).unwrap_or_else(|| "/".to_string());
            Redirect::to(&back).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let map = headers(header::COOKIE, "theme=dark; session=abc123; other=1");
        assert_eq!(session_token(&map), Some("abc123"));
    }

    #[test]
    fn ignores_lookalike_cookie_names() {
        let map = headers(header::COOKIE, "session_id=nope; sessionx=no");
        assert_eq!(session_token(&map), None);

        let map = headers(header::COOKIE, "session=");
        assert_eq!(session_token(&map), None);
    }

    #[test]
    fn clear_cookie_respects_secure_flag() {
        assert!(clear_session_cookie(true).contains("; Secure"));
        let insecure = clear_session_cookie(false);
        assert!(!insecure.contains("Secure"));
        assert!(insecure.contains("Max-Age=0"));
    }

    #[test]
    fn referer_keeps_path_and_query_only() {
        let map = headers(header::REFERER, "https://evil.example/b/acme?sort=newest");
        assert_eq!(referer_path(&map).as_deref(), Some("/b/acme?sort=newest"));

        let map = headers(header::REFERER, "/b/acme");
        assert_eq!(referer_path(&map).as_deref(), Some("/b/acme"));

        let map = headers(header::REFERER, "//evil.example/x");
        assert_eq!(referer_path(&map), None);

        assert_eq!(referer_path(&HeaderMap::new()), None);
    }
}
