//! Places and products read from the hosted store.
//!
//! Rows are decoded one at a time; a row that does not fit the model is
//! logged and left out rather than failing the whole page.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

use crate::db::{DataStore, Filter, StoreError, tables};
use crate::models::{Place, Product};

/// Every row of `places`.
///
/// # Errors
///
/// Returns the store error if the select fails.
#[instrument(skip(store))]
pub async fn list_places(store: &dyn DataStore) -> Result<Vec<Place>, StoreError> {
    let rows = store.select(tables::PLACES, &Filter::all()).await?;
    Ok(decode_rows(tables::PLACES, rows))
}

/// Every row of `products`.
///
/// # Errors
///
/// Returns the store error if the select fails.
#[instrument(skip(store))]
pub async fn list_products(store: &dyn DataStore) -> Result<Vec<Product>, StoreError> {
    let rows = store.select(tables::PRODUCTS, &Filter::all()).await?;
    Ok(decode_rows(tables::PRODUCTS, rows))
}

fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<T>(row) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(table, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    struct Tables;

    #[async_trait]
    impl DataStore for Tables {
        async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
            assert_eq!(filter, &Filter::all());
            match table {
                "places" => Ok(vec![
                    json!({"id": 1, "name": "Betla National Park"}),
                    json!({"id": 2, "description": "row without a name"}),
                    json!({"id": 3, "name": "Patratu Valley", "location": "Ramgarh"}),
                ]),
                "products" => Ok(vec![json!({"id": 9, "name": "Tussar silk saree", "price": 4200})]),
                other => Err(StoreError::Api {
                    status: 404,
                    message: format!("unknown table {other}"),
                }),
            }
        }

        async fn insert(&self, _table: &str, _row: Value) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_list_places_skips_malformed_rows() {
        let places = list_places(&Tables).await.unwrap();
        let names: Vec<_> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Betla National Park", "Patratu Valley"]);
        assert_eq!(places[1].location(), "Ramgarh");
    }

    #[tokio::test]
    async fn test_list_products() {
        let products = list_products(&Tables).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price_display(), "₹4,200.00");
    }
}
