//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page
//! GET  /itinerary        - Places from the `places` table
//! GET  /marketplace      - Listings from the `products` table
//! GET  /arvr             - AR/VR showcase
//! GET  /{page}           - Markdown page; must end in `.html`, else redirect home
//!
//! # Feedback
//! GET  /feedback         - Feedback form
//! POST /feedback         - Submit feedback (redirects home)
//! POST /handle-feedback  - Same as POST /feedback
//!
//! # Auth
//! POST /signin           - Sign in (redirect, or JSON `{error}`)
//! POST /register         - Register (redirect, or JSON `{error}`)
//! GET  /logout           - Sign out, redirect home
//!
//! # Chat
//! POST /chat             - `{message}` -> `{response}` | `{error}`
//!
//! # Admin
//! GET  /dashboard        - Sentiment summary (admins only)
//! ```

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod feedback;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/itinerary", get(pages::itinerary))
        .route("/marketplace", get(pages::marketplace))
        .route("/arvr", get(pages::arvr))
        .route("/feedback", get(feedback::form).post(feedback::submit))
        .route("/handle-feedback", post(feedback::submit))
        .route("/signin", post(auth::signin))
        .route("/register", post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/chat", post(chat::chat))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/{page}", get(pages::page))
        .fallback(pages::not_found)
}
