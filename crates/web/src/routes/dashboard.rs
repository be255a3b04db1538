//! Admin dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use jharkhand_tourism_core::SentimentSummary;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::CurrentUser;
use crate::services::dashboard::sentiment_summary;
use crate::state::AppState;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user: Option<CurrentUser>,
    pub summary: SentimentSummary,
    pub positive_percent: usize,
    pub negative_percent: usize,
    pub neutral_percent: usize,
}

impl DashboardTemplate {
    fn new(user: CurrentUser, summary: SentimentSummary) -> Self {
        let total = summary.total();
        Self {
            user: Some(user),
            positive_percent: percent(summary.positive, total),
            negative_percent: percent(summary.negative, total),
            neutral_percent: percent(summary.neutral, total),
            summary,
        }
    }
}

/// `count` as a whole percentage of `total`, rounded half up.
const fn percent(count: usize, total: usize) -> usize {
    match total {
        0 => 0,
        total => (count * 100 + total / 2) / total,
    }
}

/// Display the feedback sentiment summary.
///
/// Non-admins are redirected home by [`RequireAdmin`].
///
/// # Errors
///
/// Returns an error if the feedback scores cannot be read.
#[instrument(skip_all, fields(email = %admin.email))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse> {
    let summary = sentiment_summary(state.store()).await?;
    Ok(DashboardTemplate::new(admin, summary))
}
