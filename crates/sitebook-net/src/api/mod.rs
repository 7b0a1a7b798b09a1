//! Backend resources: typed records, id normalization, and the resource API.

pub mod models;
pub mod normalize;
mod resources;

pub use models::*;
pub use resources::SitebookApi;
