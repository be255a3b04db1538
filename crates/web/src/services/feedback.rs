//! Visitor feedback submission.

use tracing::instrument;

use jharkhand_tourism_core::SentimentScore;

use crate::db::{DataStore, StoreError, tables};
use crate::models::FeedbackEntry;

use super::sentiment::SentimentScorer;

/// Score a message and append it to `feedback`.
///
/// No validation is applied to any field. The score is computed once here
/// and stored with the row.
///
/// # Errors
///
/// Returns the store error if the insert fails.
#[instrument(skip(store, scorer, message), fields(message_len = message.len()))]
pub async fn submit(
    store: &dyn DataStore,
    scorer: &dyn SentimentScorer,
    name: &str,
    email: &str,
    message: &str,
) -> Result<FeedbackEntry, StoreError> {
    let entry = FeedbackEntry {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
        sentiment_score: SentimentScore::new(scorer.polarity(message)),
    };

    let row = serde_json::to_value(&entry).map_err(|e| StoreError::Parse(e.to_string()))?;
    store.insert(tables::FEEDBACK, row).await?;

    tracing::info!(
        score = entry.sentiment_score.value(),
        bucket = entry.sentiment_score.bucket().label(),
        "Feedback stored"
    );

    Ok(entry)
}
