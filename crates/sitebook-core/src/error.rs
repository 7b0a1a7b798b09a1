//! Error types for Sitebook core.

use std::fmt;

/// Errors raised by stores and the application context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The subscription id is unknown or was already removed.
    UnknownSubscription {
        /// Log name of the store.
        store: &'static str,
    },
    /// A project-scoped operation ran with no project selected.
    NoProjectSelected,
    /// An operation needs a bearer token but the session is signed out.
    NotAuthenticated,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSubscription { store } => {
                write!(f, "Unknown or removed subscription on store '{store}'")
            }
            Self::NoProjectSelected => write!(f, "No project is selected"),
            Self::NotAuthenticated => write!(f, "No session token is available"),
        }
    }
}

impl std::error::Error for StoreError {}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, StoreError>;
