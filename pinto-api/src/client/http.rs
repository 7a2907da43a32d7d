//! Pinto HTTP request methods

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::http_client::HttpUtils;

use super::{API_OPTIONS_HEADER, PintoClient};

impl PintoClient {
    /// Build an authenticated request
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<(RequestBuilder, String)> {
        let url = self.url(path);
        let mut builder = self.client.request(method, &url).query(query);
        if let Some(ref options) = self.api_options {
            builder = builder.header(API_OPTIONS_HEADER, options);
        }
        let builder = self.auth.apply(builder, &self.client).await?;
        Ok((builder, url))
    }

    /// Execute a GET request and parse the JSON response
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        operation: &str,
    ) -> Result<T> {
        let (builder, url) = self.request(Method::GET, path, query).await?;
        let (_, body) = HttpUtils::execute_request(builder, operation, "GET", &url).await?;
        HttpUtils::parse_json(&body, operation)
    }

    /// Execute a POST request; the response payload is ignored
    pub(crate) async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        operation: &str,
    ) -> Result<()> {
        let body_json = serde_json::to_string(body).map_err(|e| ApiError::Serialization {
            operation: operation.to_string(),
            detail: e.to_string(),
        })?;
        log::debug!("[pinto] {operation}: Request Body: {body_json}");

        let (builder, url) = self.request(Method::POST, path, &[]).await?;
        let builder = builder
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body_json);
        HttpUtils::execute_request(builder, operation, "POST", &url).await?;
        Ok(())
    }

    /// Execute a DELETE request; the response payload is ignored
    pub(crate) async fn delete(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&serde_json::Value>,
        operation: &str,
    ) -> Result<()> {
        let (mut builder, url) = self.request(Method::DELETE, path, query).await?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        HttpUtils::execute_request(builder, operation, "DELETE", &url).await?;
        Ok(())
    }
}
