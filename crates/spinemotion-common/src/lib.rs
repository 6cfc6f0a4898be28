//! # SpineMotion Common
//!
//! Shared types, error taxonomy, and logging setup for the SpineMotion dashboard.
//!
//! This crate provides the foundational types used across every other crate in
//! the workspace: the raw [`Record`] shape decoded from the document store, the
//! [`DashboardError`] taxonomy, and the tracing subscriber bootstrap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use logging::*;
pub use types::*;
pub use utils::*;
