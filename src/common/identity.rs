use axum::extract::State;
use axum::headers::{authorization::Bearer, Authorization, Cookie, HeaderMapExt};
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::dependencies::AppState;
use crate::domain::identity::RequestContext;

/// Cookie the identity provider keeps the session token in.
pub const SESSION_COOKIE: &str = "__session";

/// Bearer token first, then the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(authorization) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(authorization.token().to_owned());
    }
    headers
        .typed_get::<Cookie>()
        .and_then(|cookie| cookie.get(SESSION_COOKIE).map(str::to_owned))
}

/// Resolves the caller once per request and stores it as a `RequestContext` extension.
///
/// A provider failure does not fail the request: public operations see an anonymous
/// caller, and private operations get the failure back from `require_identity`.
pub async fn resolve_identity<B>(
    State(state): State<AppState>,
    mut request: Request<B>,
    next: Next<B>,
) -> Response {
    let context = match session_token(request.headers()) {
        Some(token) => match state.identities.current_user(&token).await {
            Ok(identity) => RequestContext::from(identity),
            Err(err) => {
                tracing::warn!("Identity lookup failed, continuing as anonymous: {}", err);
                RequestContext::unresolved(err)
            }
        },
        None => RequestContext::anonymous(),
    };

    request.extensions_mut().insert(context);

    next.run(request).await
}
