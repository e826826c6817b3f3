//! Caller identity and the authenticator boundary.
//!
//! Issuing sessions and checking passwords happen elsewhere. This crate only needs to turn a
//! presented session token into an [`Identity`], through whatever [`Authenticator`] the
//! composition root hands it.

use crate::config::users::UserConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

/// A resolved caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable user identifier; owner of pantry items
    pub user_id: String,
    /// Contact email
    pub email: String,
}

impl Identity {
    /// Builds an identity from its parts.
    #[must_use]
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }
}

/// Resolves session tokens to identities.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the identity for `session_token`, or `None` when the token is unknown.
    async fn resolve(&self, session_token: &str) -> Option<Identity>;
}

/// Authenticator backed by a fixed token table, loaded from `config.toml`.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenAuthenticator {
    sessions: HashMap<String, Identity>,
}

impl StaticTokenAuthenticator {
    /// Creates an authenticator that knows no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `session_token` for `identity`, replacing any previous mapping.
    #[must_use]
    pub fn with_session(mut self, session_token: impl Into<String>, identity: Identity) -> Self {
        self.sessions.insert(session_token.into(), identity);
        self
    }

    /// Builds the token table from configured users.
    #[must_use]
    pub fn from_users(users: &[UserConfig]) -> Self {
        users.iter().fold(Self::new(), |auth, user| {
            auth.with_session(
                user.session_token.clone(),
                Identity::new(user.user_id.clone(), user.email.clone()),
            )
        })
    }

    /// Number of known sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn resolve(&self, session_token: &str) -> Option<Identity> {
        if session_token.is_empty() {
            return None;
        }
        self.sessions.get(session_token).cloned()
    }
}
