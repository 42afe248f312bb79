use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::state::AppState;
use crate::utils::{error::AppError, session::verify_token};

/// Accepts the session token from the `token` cookie or a bearer header and
/// exposes the verified [`Claims`](crate::utils::session::Claims) to handlers.
pub async fn jwt_auth(
    State(state): State<AppState>,
    cookie_jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string());

    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or(bearer)
        .ok_or_else(|| AppError::Authentication("No token found".to_string()))?;

    let claims = verify_token(&state.config.session_secret, &token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
