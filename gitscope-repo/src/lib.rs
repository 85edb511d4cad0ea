//! GitScope Repository - remote repository access
//!
//! Locator parsing and the API client used to read repository content
//! without cloning.

pub mod api;
pub mod locator;

pub use api::*;
pub use locator::*;
