//! # SpineMotion Dashboard
//!
//! Command line front end of the movement analytics dashboard.
//!
//! One invocation computes one view: configuration is loaded, the collection
//! is fetched once, and the view's tables are written to stdout as text or
//! JSON. Logs go to stderr or the configured log file.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::*;
pub use cli::*;
pub use error::*;
