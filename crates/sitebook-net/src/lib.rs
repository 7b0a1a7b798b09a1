//! Networking module for Sitebook.
//!
//! This crate provides the client's access to the Sitebook backend:
//!
//! - **HTTP**: [`HttpClient`] over `reqwest`, and [`RestApiClient`] with a
//!   base URL, session-based bearer auth, retries and interceptors
//! - **Resources**: [`SitebookApi`] with typed records for projects,
//!   estimates, variations, purchase orders, expenses, payslips, vendors,
//!   subcontractors and items
//!
//! Every call returns [`Result<T>`](Result). Record ids are normalized at
//! this boundary so callers only ever see `id`.
//!
//! # Example
//!
//! ```ignore
//! use sitebook_core::AppContext;
//! use sitebook_net::{RestApiClient, SitebookApi};
//!
//! let ctx = AppContext::new();
//! let client = RestApiClient::builder("https://api.example.com")
//!     .session_auth(ctx.session().clone())
//!     .json_api()
//!     .build()?;
//! let api = SitebookApi::new(client, ctx.clone());
//!
//! let items = api.search_items("cement").await?;
//! ```

pub mod api;
mod error;
pub mod http;

pub use api::{
    Estimate, Expense, Item, LineItem, Payslip, Project, PurchaseOrder, SitebookApi,
    Subcontractor, Variation, Vendor,
};
pub use error::{ApiError, Result};
pub use http::{HttpClient, HttpClientBuilder, RestApiClient, RetryConfig};
