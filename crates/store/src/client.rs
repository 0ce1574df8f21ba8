//! Production [`StoreBackend`] implementation over the Cromos admin API.
//!
//! All calls carry bearer auth and a fixed per-request timeout. An absent
//! API key fails each call with [`StoreError::Unconfigured`] rather than
//! preventing startup.

use std::time::Duration;

use chrono::Utc;
use cromos_core::{MappingStatus, ProductRecord, SkuMapping};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::backend::{RunCompletion, StoreBackend};
use crate::config::StoreConfig;

/// Errors from the Cromos admin API layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `CROMOS_API_KEY` is not configured.
    #[error("Cromos admin API key is not configured")]
    Unconfigured,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Cromos admin API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the Cromos admin API.
pub struct StoreClient {
    client: reqwest::Client,
    config: StoreConfig,
}

// Response envelopes used by the admin API.

#[derive(Debug, Deserialize)]
struct MappingEnvelope {
    #[serde(default)]
    mapping: Option<SkuMapping>,
}

#[derive(Debug, Deserialize)]
struct RunEnvelope {
    log: RunRow,
}

#[derive(Debug, Deserialize)]
struct RunRow {
    id: String,
}

impl StoreClient {
    /// Create a client with a pre-configured HTTP connection pool.
    pub fn new(config: StoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    // ---- private helpers ----

    fn api_key(&self) -> Result<&str, StoreError> {
        self.config.api_key.as_deref().ok_or(StoreError::Unconfigured)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url.trim_end_matches('/'))
    }

    /// Ensure the response has a success status code, or capture the
    /// status and body text for the error.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), StoreError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

impl StoreBackend for StoreClient {
    /// `GET /admin/denea-mapping?denea_sku={code}`.
    ///
    /// Both an HTTP 404 and a `null` mapping body mean "no mapping", the
    /// expected state for an unmapped SKU.
    async fn find_mapping(&self, code: &str) -> Result<Option<SkuMapping>, StoreError> {
        let response = self
            .client
            .get(self.url("/admin/denea-mapping"))
            .query(&[("denea_sku", code)])
            .bearer_auth(self.api_key()?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: MappingEnvelope = Self::parse_response(response).await?;
        Ok(envelope.mapping)
    }

    /// `PUT /admin/denea-mapping/{id}` -- advance the freshness marker.
    async fn mark_synced(&self, mapping_id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.url(&format!("/admin/denea-mapping/{mapping_id}")))
            .bearer_auth(self.api_key()?)
            .json(&json!({
                "last_sync_at": Utc::now().to_rfc3339(),
                "mapping_status": MappingStatus::Active.as_str(),
            }))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// `PUT /admin/inventory/update` -- absolute quantity set at the
    /// configured location.
    async fn set_inventory(&self, variant_id: &str, quantity: i64) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.url("/admin/inventory/update"))
            .bearer_auth(self.api_key()?)
            .json(&json!({
                "variant_id": variant_id,
                "quantity": quantity,
                "adjustment_type": "set",
                "location_id": self.config.location_id,
            }))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// `POST /admin/products/variants/{id}/prices` -- single price in the
    /// configured currency, amount in minor units.
    async fn set_price(&self, variant_id: &str, amount_cents: i64) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.url(&format!("/admin/products/variants/{variant_id}/prices")))
            .bearer_auth(self.api_key()?)
            .json(&json!({
                "prices": [{
                    "currency_code": self.config.currency,
                    "amount": amount_cents,
                }]
            }))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// `PUT /admin/products/{id}/extended` -- overwrite the Denea-sourced
    /// attribute block.
    async fn set_extended_attributes(
        &self,
        product_id: &str,
        record: &ProductRecord,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.url(&format!("/admin/products/{product_id}/extended")))
            .bearer_auth(self.api_key()?)
            .json(&extended_attributes_body(record))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// `POST /admin/sync-log` -- create the running log row.
    async fn open_run(&self, sync_type: &str, items_total: usize) -> Result<String, StoreError> {
        let response = self
            .client
            .post(self.url("/admin/sync-log"))
            .bearer_auth(self.api_key()?)
            .json(&json!({
                "sync_type": sync_type,
                "status": "running",
                "items_processed": 0,
                "items_success": 0,
                "items_error": 0,
                "sync_data": { "total_items": items_total },
            }))
            .send()
            .await?;

        let envelope: RunEnvelope = Self::parse_response(response).await?;
        Ok(envelope.log.id)
    }

    /// `PUT /admin/sync-log/{id}` -- final counters and error details.
    async fn close_run(
        &self,
        run_id: &str,
        completion: &RunCompletion<'_>,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.url(&format!("/admin/sync-log/{run_id}")))
            .bearer_auth(self.api_key()?)
            .json(&json!({
                "status": completion.status.as_str(),
                "items_processed": completion.processed,
                "items_success": completion.updated,
                "items_error": completion.errors.len(),
                "error_details": completion.errors,
                "completed_at": Utc::now().to_rfc3339(),
            }))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// `PUT /admin/sync-log/{id}` -- mark the run aborted.
    async fn abort_run(&self, run_id: &str, message: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.url(&format!("/admin/sync-log/{run_id}")))
            .bearer_auth(self.api_key()?)
            .json(&json!({
                "status": "error",
                "error_details": { "error": message },
                "completed_at": Utc::now().to_rfc3339(),
            }))
            .send()
            .await?;

        Self::check_status(response).await
    }
}

/// Extended-attribute payload for `PUT /admin/products/{id}/extended`.
fn extended_attributes_body(record: &ProductRecord) -> serde_json::Value {
    json!({
        "denea_sku": record.code,
        "denea_category": record.category,
        "supplier_code": record.supplier,
        "cost_price": record.cost_price,
        "phone_brand": record.brand,
        "phone_model": record.model,
        "color": record.color,
        "material": record.material,
        "compatibility": record.compatibility,
        "last_sync_at": Utc::now().to_rfc3339(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ProductRecord {
        ProductRecord {
            code: "A100".to_string(),
            description: "Case".to_string(),
            category: "Covers".to_string(),
            stock: 15,
            price: 9.99,
            cost_price: Some(4.50),
            supplier: Some("SupplierX".to_string()),
            brand: Some("Apple".to_string()),
            model: Some("iPhone15".to_string()),
            color: Some("Black".to_string()),
            material: Some("Silicone".to_string()),
            compatibility: None,
        }
    }

    #[test]
    fn new_does_not_panic() {
        let _client = StoreClient::new(StoreConfig::unconfigured());
    }

    #[tokio::test]
    async fn calls_without_api_key_fail_unconfigured() {
        let client = StoreClient::new(StoreConfig::unconfigured());
        let err = client.find_mapping("A100").await.unwrap_err();
        assert!(matches!(err, StoreError::Unconfigured));

        let err = client.set_inventory("variant_1", 5).await.unwrap_err();
        assert!(matches!(err, StoreError::Unconfigured));

        let err = client.open_run("denea_csv", 10).await.unwrap_err();
        assert!(matches!(err, StoreError::Unconfigured));
    }

    #[test]
    fn url_joins_without_double_slash() {
        let mut config = StoreConfig::unconfigured();
        config.api_url = "http://localhost:9000/".to_string();
        let client = StoreClient::new(config);
        assert_eq!(
            client.url("/admin/sync-log"),
            "http://localhost:9000/admin/sync-log"
        );
    }

    #[test]
    fn extended_attributes_map_to_store_fields() {
        let body = extended_attributes_body(&sample_record());
        assert_eq!(body["denea_sku"], "A100");
        assert_eq!(body["denea_category"], "Covers");
        assert_eq!(body["supplier_code"], "SupplierX");
        assert_eq!(body["phone_brand"], "Apple");
        assert_eq!(body["phone_model"], "iPhone15");
        assert_eq!(body["color"], "Black");
        assert_eq!(body["material"], "Silicone");
        assert_eq!(body["cost_price"], 4.50);
        assert!(body["compatibility"].is_null());
        assert!(body["last_sync_at"].is_string());
    }

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = StoreError::Api {
            status: 409,
            body: "conflict".to_string(),
        };
        assert_eq!(err.to_string(), "Cromos admin API error (409): conflict");
    }
}
