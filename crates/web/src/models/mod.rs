//! Domain models for the site.
//!
//! - [`session`] - what is kept in the visitor's session
//! - [`rows`] - typed views of rows read from, or written to, the hosted store

pub mod rows;
pub mod session;

pub use rows::{FeedbackEntry, Place, Product};
pub use session::{CurrentUser, keys as session_keys};
