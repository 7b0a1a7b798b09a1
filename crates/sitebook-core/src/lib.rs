//! Core systems for Sitebook.
//!
//! This crate provides the foundations shared by the Sitebook client crates:
//!
//! - **Signal/Slot System**: Type-safe callbacks with scoped connections
//! - **Property System**: Value cells with change detection
//! - **Stores**: Shared observable values with a read / write / subscribe contract
//! - **Application Context**: The selected project and the auth session,
//!   passed explicitly instead of living in globals
//! - **Entity Ids**: One canonical id type for every backend record
//!
//! # Signal/Slot Example
//!
//! ```
//! use sitebook_core::Signal;
//!
//! let selected = Signal::<String>::new();
//! let conn_id = selected.connect(|name| println!("picked {name}"));
//!
//! selected.emit("Cement".to_string());
//! selected.disconnect(conn_id);
//! ```
//!
//! # Context Example
//!
//! ```
//! use sitebook_core::{AppContext, EntityId, StoreError};
//!
//! let ctx = AppContext::new();
//! assert_eq!(ctx.project().require(), Err(StoreError::NoProjectSelected));
//!
//! ctx.project().select(EntityId::from(12u64));
//! assert_eq!(ctx.project().require().unwrap().as_str(), "12");
//! ```

pub mod context;
mod error;
pub mod id;
pub mod logging;
pub mod property;
pub mod signal;
pub mod store;

pub use context::{AppContext, AuthSession, ProjectContext};
pub use error::{Result, StoreError};
pub use id::EntityId;
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use store::Store;
