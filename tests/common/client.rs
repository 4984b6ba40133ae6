//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per plant-catalog endpoint.
//! When API routes or request formats change, update only this file.
#![allow(dead_code)]

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

/// HTTP test client, optionally sending an `x-api-key` header on writes
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    api_key: Option<String>,
}

impl TestClient {
    /// Creates a client that sends no API key
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            api_key: None,
        }
    }

    /// Creates a client sending the key the test server expects
    pub fn with_api_key(base_url: String) -> Self {
        Self::with_custom_api_key(base_url, TEST_API_KEY)
    }

    pub fn with_custom_api_key(base_url: String, api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            ..Self::new(base_url)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("x-api-key", key),
            None => request,
        }
    }

    // ========================================================================
    // Read Endpoints
    // ========================================================================

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.client
            .get(self.url("/"))
            .send()
            .await
            .expect("Home request failed")
    }

    /// GET /plants
    pub async fn get_all_plants(&self) -> Response {
        self.client
            .get(self.url("/plants"))
            .send()
            .await
            .expect("Get all plants request failed")
    }

    /// GET /plants/{id}
    pub async fn get_plant(&self, plant_id: i64) -> Response {
        self.get_plant_raw(&plant_id.to_string()).await
    }

    /// GET /plants/{id} with an arbitrary path segment
    pub async fn get_plant_raw(&self, plant_id: &str) -> Response {
        self.client
            .get(self.url(&format!("/plants/{}", plant_id)))
            .send()
            .await
            .expect("Get plant request failed")
    }

    /// GET /plants/sort_by_date
    pub async fn get_plants_by_date(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Response {
        let mut query = Vec::new();
        if let Some(start) = start_date {
            query.push(("start_date", start));
        }
        if let Some(end) = end_date {
            query.push(("end_date", end));
        }
        self.client
            .get(self.url("/plants/sort_by_date"))
            .query(&query)
            .send()
            .await
            .expect("Plants by date request failed")
    }

    /// GET /plants/search, parameters left out when `None`
    pub async fn search_plants(
        &self,
        query: Option<&str>,
        field: Option<&str>,
        lang: Option<&str>,
    ) -> Response {
        let params: Vec<(&str, &str)> = [("query", query), ("field", field), ("lang", lang)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();
        self.client
            .get(self.url("/plants/search"))
            .query(&params)
            .send()
            .await
            .expect("Search request failed")
    }

    /// GET /lookups/{kind}
    pub async fn get_lookups(&self, kind: &str) -> Response {
        self.client
            .get(self.url(&format!("/lookups/{}", kind)))
            .send()
            .await
            .expect("Lookups request failed")
    }

    /// GET /uploads/{path}
    pub async fn get_upload(&self, path: &str) -> Response {
        self.client
            .get(self.url(&format!("/uploads/{}", path)))
            .send()
            .await
            .expect("Upload request failed")
    }

    // ========================================================================
    // Write Endpoints
    // ========================================================================

    /// POST /plants
    pub async fn create_plant(&self, body: &Value) -> Response {
        self.authorize(self.client.post(self.url("/plants")))
            .json(body)
            .send()
            .await
            .expect("Create plant request failed")
    }

    /// PUT /plants/{id}
    pub async fn update_plant(&self, plant_id: i64, body: &Value) -> Response {
        self.authorize(self.client.put(self.url(&format!("/plants/{}", plant_id))))
            .json(body)
            .send()
            .await
            .expect("Update plant request failed")
    }

    /// DELETE /plants/{id}
    pub async fn delete_plant(&self, plant_id: i64) -> Response {
        self.authorize(self.client.delete(self.url(&format!("/plants/{}", plant_id))))
            .send()
            .await
            .expect("Delete plant request failed")
    }
}
