//! # SpineMotion I18n
//!
//! Internationalization support using the Fluent localization system.
//!
//! Translations for every supported locale are embedded at compile time, so
//! label lookup never touches the filesystem.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bundle;
pub mod locale;
pub mod messages;

pub use bundle::*;
pub use locale::*;
pub use messages::*;
