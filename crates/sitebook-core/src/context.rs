//! Explicit application context.
//!
//! The current project and the session token are ordinary [`Store`]s bundled
//! into an [`AppContext`] that callers pass down to whatever needs them.
//! Screens that never receive the context cannot observe or mutate it.
//!
//! ```
//! use sitebook_core::{AppContext, EntityId};
//!
//! let ctx = AppContext::new();
//! ctx.project().select(EntityId::from("p-17"));
//! ctx.session().sign_in("token-abc");
//!
//! assert_eq!(ctx.project().require().unwrap().as_str(), "p-17");
//! assert_eq!(ctx.session().token().as_deref(), Some("token-abc"));
//! ```

use crate::error::{Result, StoreError};
use crate::id::EntityId;
use crate::signal::{ConnectionGuard, ConnectionId};
use crate::store::Store;

/// The project the user is currently working in.
#[derive(Clone, Debug)]
pub struct ProjectContext {
    current: Store<Option<EntityId>>,
}

impl ProjectContext {
    /// A context with no project selected.
    pub fn new() -> Self {
        Self {
            current: Store::named("current_project", None),
        }
    }

    /// The selected project, if any.
    pub fn current(&self) -> Option<EntityId> {
        self.current.get()
    }

    /// The selected project, or [`StoreError::NoProjectSelected`].
    pub fn require(&self) -> Result<EntityId> {
        self.current.get().ok_or(StoreError::NoProjectSelected)
    }

    /// Select a project. Returns `true` if the selection changed.
    pub fn select(&self, id: EntityId) -> bool {
        tracing::debug!(target: crate::logging::targets::STORE, project = %id, "project selected");
        self.current.set(Some(id))
    }

    /// Clear the selection. Returns `true` if a project was selected.
    pub fn clear(&self) -> bool {
        self.current.set(None)
    }

    /// Observe selection changes.
    pub fn subscribe<F>(&self, subscriber: F) -> ConnectionId
    where
        F: Fn(&Option<EntityId>) + Send + Sync + 'static,
    {
        self.current.subscribe(subscriber)
    }

    /// Observe selection changes until the guard drops.
    pub fn subscribe_scoped<F>(&self, subscriber: F) -> ConnectionGuard<Option<EntityId>>
    where
        F: Fn(&Option<EntityId>) + Send + Sync + 'static,
    {
        self.current.subscribe_scoped(subscriber)
    }

    /// Stop observing.
    pub fn unsubscribe(&self, id: ConnectionId) -> Result<()> {
        self.current.unsubscribe(id)
    }
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Holder of the bearer token used by the REST layer.
///
/// Token acquisition is outside this crate; whoever performs the login
/// calls [`sign_in`](Self::sign_in) with the result.
#[derive(Clone)]
pub struct AuthSession {
    token: Store<Option<String>>,
}

impl AuthSession {
    /// A signed-out session.
    pub fn new() -> Self {
        Self {
            token: Store::named("auth_token", None),
        }
    }

    /// The current token, if signed in.
    pub fn token(&self) -> Option<String> {
        self.token.get()
    }

    /// The current token, or [`StoreError::NotAuthenticated`].
    pub fn require_token(&self) -> Result<String> {
        self.token.get().ok_or(StoreError::NotAuthenticated)
    }

    /// Whether a token is present.
    pub fn is_signed_in(&self) -> bool {
        self.token.with(Option::is_some)
    }

    /// Store a token. Empty tokens are treated as a sign-out.
    pub fn sign_in(&self, token: impl Into<String>) -> bool {
        let token = token.into();
        if token.is_empty() {
            return self.sign_out();
        }
        let changed = self.token.set(Some(token));
        if changed {
            crate::sitebook_debug!("session token stored");
        }
        changed
    }

    /// Drop the token. Returns `true` if one was present.
    pub fn sign_out(&self) -> bool {
        let changed = self.token.set(None);
        if changed {
            crate::sitebook_info!("signed out");
        }
        changed
    }

    /// Observe sign-in / sign-out. The callback receives whether a token is present.
    pub fn subscribe<F>(&self, subscriber: F) -> ConnectionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.token.subscribe(move |token| subscriber(token.is_some()))
    }

    /// Stop observing.
    pub fn unsubscribe(&self, id: ConnectionId) -> Result<()> {
        self.token.unsubscribe(id)
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}

/// Everything a screen may read or write about the running application.
///
/// Cloning is cheap; all clones observe the same stores.
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    project: ProjectContext,
    session: AuthSession,
}

impl AppContext {
    /// A fresh context: no project, signed out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from existing parts.
    pub fn from_parts(project: ProjectContext, session: AuthSession) -> Self {
        Self { project, session }
    }

    /// The project selection.
    pub fn project(&self) -> &ProjectContext {
        &self.project
    }

    /// The auth session.
    pub fn session(&self) -> &AuthSession {
        &self.session
    }
}
