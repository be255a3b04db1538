//! Core types for the tourism site.

pub mod id;
pub mod price;
pub mod role;
pub mod sentiment;

pub use id::UserId;
pub use price::{Price, PriceError};
pub use role::{Role, RoleParseError};
pub use sentiment::{SentimentBucket, SentimentScore, SentimentSummary};
