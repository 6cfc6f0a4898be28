//! # SpineMotion Analytics
//!
//! The data pipeline behind the dashboard views: loading a collection snapshot
//! from a document store, decoding documents into records, deriving calendar
//! features, and aggregating the result into tables.
//!
//! Every aggregation is a plain synchronous computation over an in-memory
//! snapshot; only store access is async.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod category;
pub mod day_of_week;
pub mod features;
pub mod gender;
pub mod hour_of_day;
pub mod loader;
pub mod monthly_users;
pub mod schema;
pub mod store;
pub mod working_day;

pub use aggregator::*;
pub use category::*;
pub use day_of_week::*;
pub use features::*;
pub use gender::*;
pub use hour_of_day::*;
pub use loader::*;
pub use monthly_users::*;
pub use schema::*;
pub use store::*;
pub use working_day::*;
