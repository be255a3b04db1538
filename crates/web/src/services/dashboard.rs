//! Sentiment summary for the admin dashboard.

use serde_json::Value;
use tracing::instrument;

use jharkhand_tourism_core::SentimentSummary;

use crate::db::{DataStore, Filter, StoreError, tables};

/// Count stored feedback per sentiment bucket.
///
/// Reads every `sentiment_score` in one select and classifies each in a
/// single pass. Rows without a numeric score are skipped and logged.
///
/// # Errors
///
/// Returns the store error if the select fails.
#[instrument(skip(store))]
pub async fn sentiment_summary(store: &dyn DataStore) -> Result<SentimentSummary, StoreError> {
    let rows = store
        .select(tables::FEEDBACK, &Filter::all().columns("sentiment_score"))
        .await?;

    let mut skipped = 0_usize;
    let summary = rows
        .iter()
        .filter_map(|row| {
            let score = row.get("sentiment_score").and_then(Value::as_f64);
            if score.is_none() {
                skipped += 1;
            }
            score
        })
        .collect::<SentimentSummary>();

    if skipped > 0 {
        tracing::warn!(skipped, "Feedback rows without a numeric sentiment score");
    }

    Ok(summary)
}
