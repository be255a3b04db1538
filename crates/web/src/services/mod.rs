//! Request-independent logic behind the routes.
//!
//! # Services
//!
//! - `auth` - sign-in, registration and role lookup via the identity provider
//! - `chat` - the chat proxy in front of the chat-completion API
//! - `dashboard` - sentiment bucket counts for the admin dashboard
//! - `feedback` - scoring and storing visitor feedback
//! - `listings` - places and products for the itinerary and marketplace
//! - `sentiment` - the text polarity scorer

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod feedback;
pub mod listings;
pub mod sentiment;
