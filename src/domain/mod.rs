//! Domain layer containing the URL mapping model and its contracts.
//!
//! This module defines what the service stores and the interfaces the core
//! depends on, independent of PostgreSQL, Redis or HTTP.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Persistence contract for URL mappings
//! - [`code_generator`] - Source of candidate short codes
//! - [`error`] - Error taxonomy of the URL store
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository and generator traits are implemented by the infrastructure and
//!   utility layers and injected into [`crate::application::services::UrlService`]
//! - Uniqueness of short codes is enforced by the repository's atomic
//!   insert-if-absent, never by in-process locking

pub mod code_generator;
pub mod entities;
pub mod error;
pub mod repositories;
