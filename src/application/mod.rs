//! Application layer services implementing business logic.
//!
//! Services consume the domain's repository and generator traits and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Short code assignment and resolution

pub mod services;
