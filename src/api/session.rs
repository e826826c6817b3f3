//! Session credentials.
//!
//! Clients present their session token either as `Authorization: Bearer <token>` or as a
//! `session` cookie. The [`Caller`] extractor never rejects; an unknown or missing token
//! simply yields no identity and the service decides what that means.

use super::AppState;
use crate::core::auth::Identity;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        HeaderMap,
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};
use std::convert::Infallible;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Returns the session token presented with a request, if any.
///
/// A bearer token takes precedence over the cookie. Whitespace around either token is
/// ignored, so `Bearer  abc` yields `abc`. A cookie value wrapped in double quotes
/// (`session="abc"`) yields the unquoted `abc`.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, token)| unquote(token.trim()))
            .filter(|token| !token.is_empty())
    })
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

/// The resolved caller of a request, or `None` when unauthenticated.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<Identity>);

impl Caller {
    /// Borrowed identity, in the shape the service functions take.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let identity = match session_token(&parts.headers) {
            Some(token) => state.authenticator.resolve(token).await,
            None => None,
        };
        Ok(Self(identity))
    }
}
