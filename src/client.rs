use reqwest::{header, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::ApiError;
use crate::models::{ItemPayload, ItemRecord, OrderPayload, OrderRecord};

static USER_AGENT: &str = concat!("orders-client/", env!("CARGO_PKG_VERSION"));

/// Async client for the orders service. One method per page action;
/// every method is a single request/response exchange with no retry,
/// no timeout override and no caching.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    http: reqwest::Client,
    base_url: String,
}

impl OrdersApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    fn orders_url(&self) -> String {
        format!("{}/api/orders", self.base_url)
    }

    fn order_url(&self, id: &str) -> String {
        format!("{}/{}", self.orders_url(), id)
    }

    fn items_url(&self, order_id: &str) -> String {
        format!("{}/items", self.order_url(order_id))
    }

    fn item_url(&self, order_id: &str, item_id: &str) -> String {
        format!("{}/{}", self.items_url(order_id), item_id)
    }

    pub async fn create_order(&self, payload: &OrderPayload) -> Result<OrderRecord, ApiError> {
        let url = self.orders_url();
        debug!(%url, "POST order");
        let response = self.http.post(url).json(payload).send().await?;
        Self::parse(response).await
    }

    pub async fn update_order(
        &self,
        id: &str,
        payload: &OrderPayload,
    ) -> Result<OrderRecord, ApiError> {
        let url = self.order_url(id);
        debug!(%url, "PUT order");
        let response = self.http.put(url).json(payload).send().await?;
        Self::parse(response).await
    }

    pub async fn get_order(&self, id: &str) -> Result<OrderRecord, ApiError> {
        let url = self.order_url(id);
        debug!(%url, "GET order");
        let response = self.http.get(url).send().await?;
        Self::parse(response).await
    }

    pub async fn delete_order(&self, id: &str) -> Result<(), ApiError> {
        let url = self.order_url(id);
        debug!(%url, "DELETE order");
        let response = self.http.delete(url).send().await?;
        Self::expect_success(response).await
    }

    /// PUT `…/cancel` with an empty body. The page still declared JSON
    /// content on this call, so we do too.
    pub async fn cancel_order(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/cancel", self.order_url(id));
        debug!(%url, "PUT order cancel");
        let response = self
            .http
            .put(url)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Self::expect_success(response).await
    }

    /// `query` is the pre-built filter string; it is appended after `?`
    /// even when empty, matching the page's URL shape.
    pub async fn search_orders(&self, query: &str) -> Result<Vec<OrderRecord>, ApiError> {
        let url = format!("{}?{}", self.orders_url(), query);
        debug!(%url, "GET order search");
        let response = self.http.get(url).send().await?;
        Self::parse(response).await
    }

    pub async fn create_item(
        &self,
        order_id: &str,
        payload: &ItemPayload,
    ) -> Result<ItemRecord, ApiError> {
        let url = self.items_url(order_id);
        debug!(%url, "POST item");
        let response = self.http.post(url).json(payload).send().await?;
        Self::parse(response).await
    }

    pub async fn update_item(
        &self,
        order_id: &str,
        item_id: &str,
        payload: &ItemPayload,
    ) -> Result<ItemRecord, ApiError> {
        let url = self.item_url(order_id, item_id);
        debug!(%url, "PUT item");
        let response = self.http.put(url).json(payload).send().await?;
        Self::parse(response).await
    }

    pub async fn get_item(&self, order_id: &str, item_id: &str) -> Result<ItemRecord, ApiError> {
        let url = self.item_url(order_id, item_id);
        debug!(%url, "GET item");
        let response = self.http.get(url).send().await?;
        Self::parse(response).await
    }

    pub async fn delete_item(&self, order_id: &str, item_id: &str) -> Result<(), ApiError> {
        let url = self.item_url(order_id, item_id);
        debug!(%url, "DELETE item");
        let response = self.http.delete(url).send().await?;
        Self::expect_success(response).await
    }

    pub async fn search_items(
        &self,
        order_id: &str,
        query: &str,
    ) -> Result<Vec<ItemRecord>, ApiError> {
        let url = format!("{}?{}", self.items_url(order_id), query);
        debug!(%url, "GET item search");
        let response = self.http.get(url).send().await?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::failure(status, response).await);
        }
        Ok(response.json::<T>().await?)
    }

    async fn expect_success(response: Response) -> Result<(), ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::failure(status, response).await);
        }
        Ok(())
    }

    /// Reads the display message out of a failure body. The service
    /// answers errors with `{"message": "..."}`; anything else falls
    /// back to the raw body text, then to the status reason.
    async fn failure(status: StatusCode, response: Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        warn!(%status, %message, "orders api call failed");
        ApiError::Api { status, message }
    }
}
