//! Catalog layer - category/endpoint tree, search and parameter extraction
//!
//! Everything here is plain data in, plain data out. The terminal renderer
//! consumes `ViewRow`s and never reaches into the catalog directly.

pub mod filter;
pub mod model;
pub mod params;
pub mod view;

pub use filter::filter_catalog;
pub use model::Catalog;
pub use params::extract_parameters;
pub use view::{build_view, ExpansionState, ViewRow};
