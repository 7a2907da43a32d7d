//! Generic HTTP request handling
//!
//! Every gateway call goes through [`HttpUtils::execute_request`], so sending,
//! logging and status classification happen in exactly one place. Callers
//! build the `RequestBuilder` themselves (URL, query, headers, body).
//!
//! Classification rules:
//! - transport failures become [`ApiError::Network`] or [`ApiError::Timeout`]
//! - HTTP status `>= 400` becomes [`ApiError::Http`] with the body drained
//! - anything below 400 is success, whatever the payload looks like
//!
//! Nothing here retries.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `operation` - operation label used in errors, e.g. `"ZONE CREATE"`
    /// * `method_name` - HTTP method (for logs)
    /// * `url` - request URL (for logs)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` for any status below 400
    /// * `Err(ApiError::Http)` for status `>= 400`
    /// * `Err(ApiError::Network | ApiError::Timeout)` for transport failures
    pub async fn execute_request(
        request_builder: RequestBuilder,
        operation: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), ApiError> {
        log::debug!("[pinto] {operation}: {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(operation, &e))?;

        let status = response.status();
        log::debug!("[pinto] {operation}: Response Status: {status}");

        let response_text = response.text().await;

        if status.as_u16() >= 400 {
            // A body that cannot be read still yields the status error.
            let body = response_text.unwrap_or_default();
            return Err(classify_failure(operation, status.as_u16(), &status.to_string(), body));
        }

        let response_text = response_text.map_err(|e| ApiError::Network {
            operation: operation.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;

        log::debug!(
            "[pinto] {operation}: Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status.as_u16(), response_text))
    }

    /// Parse a JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ApiError::Parse)` - parsing failed
    pub fn parse_json<T>(response_text: &str, operation: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[pinto] {operation}: JSON parse failed: {e}");
            log::error!(
                "[pinto] {operation}: Raw response: {}",
                truncate_for_log(response_text)
            );
            ApiError::Parse {
                operation: operation.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// Map a `reqwest` send failure to a typed error.
fn transport_error(operation: &str, e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout {
            operation: operation.to_string(),
            detail: e.to_string(),
        }
    } else {
        ApiError::Network {
            operation: operation.to_string(),
            detail: e.to_string(),
        }
    }
}

/// Build the error for a status `>= 400` response and log it.
fn classify_failure(operation: &str, status: u16, message: &str, body: String) -> ApiError {
    let err = ApiError::Http {
        operation: operation.to_string(),
        status,
        message: message.to_string(),
        body,
    };
    if err.is_expected() {
        log::warn!(
            "[pinto] Unable to perform operation {operation}. Reason: {message}. Details: {}",
            truncate_for_log(err.body().unwrap_or_default())
        );
    } else {
        log::error!(
            "[pinto] Unable to perform operation {operation}. Reason: {message}. Details: {}",
            truncate_for_log(err.body().unwrap_or_default())
        );
    }
    err
}
