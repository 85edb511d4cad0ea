//! GitScope Core - shared error, logging, and configuration infrastructure
//!
//! Every other crate in the workspace builds on the types defined here.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;
