//! Page route handlers.
//!
//! Every page shows the signed-in user, if any, in the navigation bar.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, Place, Product};
use crate::services::listings;
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub user: Option<CurrentUser>,
}

/// Itinerary template.
#[derive(Template, WebTemplate)]
#[template(path = "itinerary.html")]
pub struct ItineraryTemplate {
    pub user: Option<CurrentUser>,
    pub places: Vec<Place>,
}

/// Marketplace template.
#[derive(Template, WebTemplate)]
#[template(path = "marketplace.html")]
pub struct MarketplaceTemplate {
    pub user: Option<CurrentUser>,
    pub products: Vec<Product>,
}

/// AR/VR showcase template.
#[derive(Template, WebTemplate)]
#[template(path = "arvr.html")]
pub struct ArVrTemplate {
    pub user: Option<CurrentUser>,
}

/// Markdown content page template.
#[derive(Template, WebTemplate)]
#[template(path = "page.html")]
pub struct ContentPageTemplate {
    pub user: Option<CurrentUser>,
    pub title: String,
    pub description: String,
    pub content_html: String,
}

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub user: Option<CurrentUser>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the home page.
pub async fn home(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    HomeTemplate { user }
}

/// Display every place from the hosted store.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
#[instrument(skip(state, user))]
pub async fn itinerary(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let places = listings::list_places(state.store()).await?;
    Ok(ItineraryTemplate { user, places })
}

/// Display every product from the hosted store.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
#[instrument(skip(state, user))]
pub async fn marketplace(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let products = listings::list_products(state.store()).await?;
    Ok(MarketplaceTemplate { user, products })
}

/// Display the AR/VR showcase.
pub async fn arvr(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    ArVrTemplate { user }
}

/// Where a `/{page}` request should go.
#[derive(Debug, PartialEq, Eq)]
pub enum PageTarget<'a> {
    /// Not an `.html` name; send the visitor home.
    Home,
    /// A page with its own route, e.g. `itinerary.html` -> `/itinerary`.
    Canonical(&'static str),
    /// A markdown page looked up by slug.
    Content(&'a str),
}

/// Resolve a `/{page}` path segment.
#[must_use]
pub fn resolve_page(name: &str) -> PageTarget<'_> {
    let Some(slug) = name.strip_suffix(".html") else {
        return PageTarget::Home;
    };

    match slug {
        "" | "index" => PageTarget::Canonical("/"),
        "itinerary" => PageTarget::Canonical("/itinerary"),
        "marketplace" => PageTarget::Canonical("/marketplace"),
        "arvr" => PageTarget::Canonical("/arvr"),
        "feedback" => PageTarget::Canonical("/feedback"),
        "dashboard" => PageTarget::Canonical("/dashboard"),
        slug => PageTarget::Content(slug),
    }
}

/// Generic page passthrough.
///
/// Only names ending in `.html` are served; anything else redirects home.
#[instrument(skip(state, user))]
pub async fn page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(name): Path<String>,
) -> Response {
    match resolve_page(&name) {
        PageTarget::Home => Redirect::to("/").into_response(),
        PageTarget::Canonical(path) => Redirect::to(path).into_response(),
        PageTarget::Content(slug) => match state.content().get_page(slug) {
            Some(page) => ContentPageTemplate {
                user,
                title: page.meta.title.clone(),
                description: page.description().to_string(),
                content_html: page.content_html.clone(),
            }
            .into_response(),
            None => {
                tracing::debug!(slug, "Unknown content page");
                (StatusCode::NOT_FOUND, NotFoundTemplate { user }).into_response()
            }
        },
    }
}

/// Fallback for unmatched paths.
pub async fn not_found(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate { user })
}
