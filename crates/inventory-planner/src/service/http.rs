//! JSON-over-HTTP client for the inventory service.

use super::{InventoryService, ServiceError};
use crate::config::ClientConfig;
use crate::model::{
    BomEntry, BomEntryRequest, Decimal, Product, ProductDetail, ProductId,
    ProductRequest, ProductionSuggestion, RawMaterial, RawMaterialId, RawMaterialRequest,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Talks to the service at `base_url` (e.g. `http://localhost:8080/api`).
///
/// No timeout is configured: a hung call stays pending until the transport
/// gives up.
#[derive(Clone)]
pub struct HttpInventoryService {
    client: Client,
    base_url: String,
}

impl HttpInventoryService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status.as_u16(), &body))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ServiceError> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                ServiceError::Decode(e.to_string())
            } else {
                ServiceError::Network(e.to_string())
            }
        })
    }

    async fn execute(&self, request: RequestBuilder) -> Result<(), ServiceError> {
        self.send(request).await.map(|_| ())
    }
}

/// Maps a non-2xx status and its body to a [`ServiceError`].
///
/// The message is the body's `message` field when the body is a JSON object
/// carrying one, the raw body text otherwise, and `HTTP <status>` for an empty
/// body.
pub fn classify_status(status: u16, body: &str) -> ServiceError {
    let message = error_message(status, body);
    match status {
        400 | 409 | 422 => ServiceError::Validation(message),
        404 => ServiceError::NotFound(message),
        _ => ServiceError::Server { status, message },
    }
}

fn error_message(status: u16, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_owned));
    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => format!("HTTP {status}"),
        None => body.trim().to_string(),
    }
}

#[async_trait]
impl InventoryService for HttpInventoryService {
    #[instrument(skip(self))]
    async fn list_raw_materials(&self) -> Result<Vec<RawMaterial>, ServiceError> {
        self.fetch(self.client.get(self.url("/raw-materials"))).await
    }

    #[instrument(skip(self))]
    async fn get_raw_material(&self, id: RawMaterialId) -> Result<RawMaterial, ServiceError> {
        self.fetch(self.client.get(self.url(&format!("/raw-materials/{id}"))))
            .await
    }

    #[instrument(skip(self))]
    async fn create_raw_material(
        &self,
        request: RawMaterialRequest,
    ) -> Result<RawMaterial, ServiceError> {
        self.fetch(self.client.post(self.url("/raw-materials")).json(&request))
            .await
    }

    #[instrument(skip(self))]
    async fn update_raw_material(
        &self,
        id: RawMaterialId,
        request: RawMaterialRequest,
    ) -> Result<RawMaterial, ServiceError> {
        let url = self.url(&format!("/raw-materials/{id}"));
        self.fetch(self.client.put(url).json(&request)).await
    }

    #[instrument(skip(self))]
    async fn delete_raw_material(&self, id: RawMaterialId) -> Result<(), ServiceError> {
        self.execute(self.client.delete(self.url(&format!("/raw-materials/{id}"))))
            .await
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.fetch(self.client.get(self.url("/products"))).await
    }

    #[instrument(skip(self))]
    async fn get_product_detail(&self, id: ProductId) -> Result<ProductDetail, ServiceError> {
        self.fetch(self.client.get(self.url(&format!("/products/{id}"))))
            .await
    }

    #[instrument(skip(self))]
    async fn create_product(&self, request: ProductRequest) -> Result<Product, ServiceError> {
        self.fetch(self.client.post(self.url("/products")).json(&request))
            .await
    }

    #[instrument(skip(self))]
    async fn update_product(
        &self,
        id: ProductId,
        request: ProductRequest,
    ) -> Result<Product, ServiceError> {
        let url = self.url(&format!("/products/{id}"));
        self.fetch(self.client.put(url).json(&request)).await
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: ProductId) -> Result<(), ServiceError> {
        self.execute(self.client.delete(self.url(&format!("/products/{id}"))))
            .await
    }

    #[instrument(skip(self))]
    async fn list_bom(&self, product_id: ProductId) -> Result<Vec<BomEntry>, ServiceError> {
        let url = self.url(&format!("/products/{product_id}/raw-materials"));
        self.fetch(self.client.get(url)).await
    }

    #[instrument(skip(self))]
    async fn add_bom_entry(
        &self,
        product_id: ProductId,
        request: BomEntryRequest,
    ) -> Result<BomEntry, ServiceError> {
        let url = self.url(&format!("/products/{product_id}/raw-materials"));
        self.fetch(self.client.post(url).json(&request)).await
    }

    #[instrument(skip(self))]
    async fn update_bom_entry(
        &self,
        product_id: ProductId,
        raw_material_id: RawMaterialId,
        required_quantity: Decimal,
    ) -> Result<BomEntry, ServiceError> {
        let url = self.url(&format!(
            "/products/{product_id}/raw-materials/{raw_material_id}"
        ));
        let body = BomEntryRequest {
            raw_material_id,
            required_quantity,
        };
        self.fetch(self.client.put(url).json(&body)).await
    }

    #[instrument(skip(self))]
    async fn remove_bom_entry(
        &self,
        product_id: ProductId,
        raw_material_id: RawMaterialId,
    ) -> Result<(), ServiceError> {
        let url = self.url(&format!(
            "/products/{product_id}/raw-materials/{raw_material_id}"
        ));
        self.execute(self.client.delete(url)).await
    }

    #[instrument(skip(self))]
    async fn production_suggestions(&self) -> Result<ProductionSuggestion, ServiceError> {
        self.fetch(self.client.get(self.url("/production-planning/suggestions")))
            .await
    }
}
