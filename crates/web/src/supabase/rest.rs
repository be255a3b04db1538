//! `DataStore` implementation over the REST API.

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use crate::db::{DataStore, Filter, StoreError};

use super::SupabaseClient;
use super::types::ApiErrorBody;

impl SupabaseClient {
    /// Build `rest/v1/{table}?select=..&col=eq.value`.
    fn table_url(&self, table: &str, filter: Option<&Filter>) -> Result<url::Url, StoreError> {
        let mut url = self
            .endpoint(&format!("rest/v1/{table}"))
            .map_err(|e| StoreError::Parse(format!("invalid table URL: {e}")))?;

        if let Some(filter) = filter {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", filter.selected_columns());
            for (column, value) in filter.conditions() {
                query.append_pair(column, &format!("eq.{value}"));
            }
        }

        Ok(url)
    }
}

async fn api_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let raw = response.text().await.unwrap_or_default();
    StoreError::Api {
        status,
        message: ApiErrorBody::message_from(&raw),
    }
}

#[async_trait]
impl DataStore for SupabaseClient {
    #[instrument(skip(self), fields(table = %table))]
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let url = self.table_url(table, Some(filter))?;

        let response = self.http().get(url).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    #[instrument(skip(self, row), fields(table = %table))]
    async fn insert(&self, table: &str, row: Value) -> Result<(), StoreError> {
        let url = self.table_url(table, None)?;

        let response = self
            .http()
            .post(url)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use url::Url;

    use super::*;
    use crate::config::SupabaseConfig;

    fn client() -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig {
            url: Url::parse("https://abcd.supabase.co").unwrap(),
            api_key: SecretString::from("test-anon-key"),
        })
        .unwrap()
    }

    #[test]
    fn test_table_url_with_filter() {
        let url = client()
            .table_url("profiles", Some(&Filter::eq("id", "u-1").columns("role")))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://abcd.supabase.co/rest/v1/profiles?select=role&id=eq.u-1"
        );
    }

    #[test]
    fn test_table_url_select_all() {
        let url = client().table_url("places", Some(&Filter::all())).unwrap();
        assert_eq!(
            url.as_str(),
            "https://abcd.supabase.co/rest/v1/places?select=*"
        );
    }

    #[test]
    fn test_table_url_for_insert_has_no_query() {
        let url = client().table_url("feedback", None).unwrap();
        assert_eq!(url.as_str(), "https://abcd.supabase.co/rest/v1/feedback");
    }

    #[test]
    fn test_filter_values_are_encoded() {
        let url = client()
            .table_url("places", Some(&Filter::eq("name", "Betla & Palamu")))
            .unwrap();
        assert!(url.as_str().ends_with("name=eq.Betla+%26+Palamu"));
    }
}
