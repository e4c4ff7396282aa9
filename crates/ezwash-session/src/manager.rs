//! Session state machine and its manager.

use std::sync::Arc;

use ezwash_core::types::{Credentials, Profile, Registration};
use ezwash_core::{ApiService, Result, TokenStore};
use tokio::sync::watch;

use crate::{Route, TRACING_TARGET};

/// Where the session currently stands.
///
/// A fresh manager reports [`SessionState::Initializing`] until
/// [`SessionManager::initialize`] has resolved any persisted tokens, so
/// consumers can hold rendering instead of flashing a logged-out view at
/// an actor who is about to be restored.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// Persisted tokens have not been resolved yet.
    #[default]
    Initializing,
    /// A profile was fetched with the stored access token.
    Authenticated(Profile),
    /// No usable session.
    Anonymous,
}

impl SessionState {
    /// Returns the profile when authenticated.
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }

    /// Returns true once initialization has settled either way.
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Initializing)
    }
}

struct SessionManagerInner {
    api: ApiService,
    tokens: Arc<dyn TokenStore>,
    state: watch::Sender<SessionState>,
}

/// Owns the session lifecycle: restore, login, registration, and logout.
///
/// The manager is the only writer of the token store; the HTTP client
/// reads the access token and may clear the pair when the server rejects
/// it. State changes are published through a [`watch`] channel so any
/// number of observers can react to logins and logouts.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionManagerInner>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a manager in the [`SessionState::Initializing`] state.
    pub fn new(api: ApiService, tokens: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Initializing);
        Self {
            inner: Arc::new(SessionManagerInner { api, tokens, state }),
        }
    }

    /// Returns a receiver observing every session state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Returns the current session state.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Resolves persisted tokens into a settled session state.
    ///
    /// With no stored access token this settles to anonymous without any
    /// network traffic. With one, the profile is fetched; a rejected or
    /// otherwise failed fetch clears the stale pair and settles to
    /// anonymous rather than surfacing an error, since a cold start with
    /// expired tokens is an expected path.
    pub async fn initialize(&self) -> SessionState {
        if self.inner.tokens.access().is_none() {
            self.set_state(SessionState::Anonymous);
            return self.state();
        }

        match self.inner.api.fetch_profile().await {
            Ok(profile) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    username = %profile.username,
                    role = %profile.role,
                    "session restored from stored tokens"
                );
                self.set_state(SessionState::Authenticated(profile));
            }
            Err(error) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %error,
                    "stored tokens rejected; settling anonymous"
                );
                self.inner.tokens.clear();
                self.set_state(SessionState::Anonymous);
            }
        }

        self.state()
    }

    /// Logs in and returns the landing route for the actor's role.
    ///
    /// Stale tokens are cleared before the attempt so a failed login can
    /// never leave a half-valid pair behind. On success the pair is
    /// persisted and the profile fetched; if that fetch fails the pair is
    /// cleared again and the session stays anonymous.
    pub async fn login(&self, credentials: &Credentials) -> Result<Route> {
        self.inner.tokens.clear();

        let pair = match self.inner.api.login(credentials).await {
            Ok(pair) => pair,
            Err(error) => {
                self.set_state(SessionState::Anonymous);
                return Err(error);
            }
        };
        self.inner.tokens.store(&pair);

        match self.inner.api.fetch_profile().await {
            Ok(profile) => {
                let route = Route::for_role(profile.role);
                tracing::info!(
                    target: TRACING_TARGET,
                    username = %profile.username,
                    role = %profile.role,
                    route = %route,
                    "login succeeded"
                );
                self.set_state(SessionState::Authenticated(profile));
                Ok(route)
            }
            Err(error) => {
                self.inner.tokens.clear();
                self.set_state(SessionState::Anonymous);
                Err(error)
            }
        }
    }

    /// Creates an account, then establishes a session with exactly one
    /// follow-up login using the registration's credentials.
    pub async fn register(&self, registration: &Registration) -> Result<Route> {
        self.inner.api.register(registration).await?;
        tracing::info!(
            target: TRACING_TARGET,
            username = %registration.username,
            "account created; logging in"
        );
        self.login(&registration.credentials()).await
    }

    /// Ends the session. Infallible; always lands on the home route.
    pub fn logout(&self) -> Route {
        self.inner.tokens.clear();
        self.set_state(SessionState::Anonymous);
        tracing::info!(target: TRACING_TARGET, "logged out");
        Route::Home
    }

    fn set_state(&self, state: SessionState) {
        // send only fails with no receivers; the state must update anyway.
        self.inner.state.send_replace(state);
    }
}
