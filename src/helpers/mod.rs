//! Helper functions shared by the builders
//!
//! Date formatting, URL building and escaping. Nothing in here touches
//! the filesystem.

pub mod date;
mod html;
mod url;

pub use html::*;
pub use url::*;
