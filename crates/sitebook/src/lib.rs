//! Sitebook client for construction project management.
//!
//! This crate holds the interactive pieces of the client and re-exports the
//! lower layers:
//!
//! - **Typeahead**: a filtered overlay under a text input with keyboard
//!   navigation, placement and listener lifecycle ([`typeahead`])
//! - **Dialogs**: one modal slot per screen with typed payloads ([`dialog`])
//! - **Forms**: client-side validation of record drafts ([`form`])
//! - **Configuration**: TOML settings and client construction ([`config`])
//! - **Core**: stores, signals and the explicit [`AppContext`] (from `sitebook-core`)
//! - **Network**: the typed backend API (from `sitebook-net`)
//!
//! # Example
//!
//! ```
//! use sitebook::geometry::Rect;
//! use sitebook::typeahead::{SharedLayout, TypeaheadOptions, TypeaheadOverlay};
//! use sitebook::{EntityId, Item};
//!
//! let cement = Item {
//!     id: EntityId::from("i1"),
//!     name: "Cement".into(),
//!     unit: "bag".into(),
//!     rate: 420.0,
//!     category: None,
//!     code: None,
//! };
//!
//! let layout = SharedLayout::new(Rect::new(0.0, 0.0, 320.0, 32.0));
//! let mut overlay = TypeaheadOverlay::new(layout, TypeaheadOptions::default());
//! overlay.set_candidates(vec![cement]);
//! overlay.set_query("cem");
//!
//! let view = overlay.render().unwrap();
//! assert_eq!(view.rows[0].label, "Cement");
//! ```

pub mod config;
pub mod dialog;
pub mod events;
pub mod form;
pub mod geometry;
pub mod typeahead;

pub use config::{ClientConfig, ConfigError};
pub use dialog::{DeleteTarget, Dialog, DialogKind, DialogState};
pub use events::{Key, KeyPressEvent, PointerTarget};
pub use typeahead::{Candidate, Suggestion, TypeaheadOptions, TypeaheadOverlay};

pub use sitebook_core::{
    AppContext, AuthSession, ConnectionGuard, ConnectionId, EntityId, ProjectContext, Signal,
    Store, StoreError,
};
pub use sitebook_net::{
    ApiError, Estimate, Expense, Item, LineItem, Payslip, Project, PurchaseOrder, SitebookApi,
    Subcontractor, Variation, Vendor,
};
