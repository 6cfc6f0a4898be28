//! # SpineMotion Views
//!
//! The three dashboard views and their output.
//!
//! A [`ViewRunner`] fetches a snapshot, computes the tables a view needs and
//! returns a serializable [`ViewReport`]; a [`Renderer`] turns the report into
//! localized text tables or JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod render;
pub mod report;
pub mod runner;
pub mod view;

pub use render::*;
pub use report::*;
pub use runner::*;
pub use view::*;
