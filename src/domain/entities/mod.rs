//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`UrlMapping`] - A persisted short code → long URL association
//! - [`NewUrlMapping`] - Input for creating a mapping
//!
//! Mappings are created exactly once and never updated or deleted.

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
