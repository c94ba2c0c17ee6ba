//! Request transport.
//!
//! The single funnel every API call goes through. It builds the URL from the
//! configured base, attaches the stored access token as a bearer header when
//! one exists, and folds every response into one outcome contract:
//!
//! - non-success status: [`ClientError::Transport`] with a readable message
//! - `204 No Content`: `Ok(None)`
//! - JSON content type: `Ok(Some(value))`, or `Ok(None)` when the body is
//!   empty or cannot be decoded (reported as [`NonFatal::MalformedBody`])
//! - any other content type: `Ok(None)`
//!
//! The transport never retries, never refreshes tokens and never writes to
//! the credential store.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use soundvault_storage::{CredentialKey, CredentialStore};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::diagnostics::{Diagnostics, NonFatal};
use crate::error::{ClientError, Result};

/// Body of an outgoing request.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Sent with `Content-Type: application/json`
    Json(serde_json::Value),
    /// Sent as `multipart/form-data` with the client's own boundary
    Multipart(Form),
}

/// One request to the API, relative to the configured base URL.
#[derive(Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
    /// Informational only: the server enforces authentication, so a request
    /// without a stored token is still sent.
    pub requires_auth: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            requires_auth: false,
        }
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a multipart body.
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }
}

/// Stateless HTTP primitive shared by the session manager and the API façade.
///
/// Cheap to clone: clones share the connection pool, the store and the
/// diagnostics channel.
#[derive(Clone)]
pub struct Transport {
    http: Client,
    base_url: Arc<str>,
    store: Arc<dyn CredentialStore>,
    diagnostics: Diagnostics,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Create a transport. The base URL is validated and normalized once here.
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn CredentialStore>,
        diagnostics: Diagnostics,
    ) -> Result<Self> {
        let base_url = config.normalized_base_url()?;

        // No client-side timeout: a call either completes or fails
        let http = Client::builder().user_agent(config.user_agent()).build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            store,
            diagnostics,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Absolute URL for an API path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the outcome.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Option<T>> {
        let url = self.url_for(&request.path);
        let token = self.store.get(CredentialKey::AccessToken).await?;

        debug!(
            method = %request.method,
            url = %url,
            requires_auth = request.requires_auth,
            has_token = token.is_some(),
            "Sending request"
        );
        if request.requires_auth && token.is_none() {
            debug!(url = %url, "No access token stored; sending unauthenticated");
        }

        let mut builder = self.http.request(request.method, &url);
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await?;
        self.read_response(&request.path, response).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        requires_auth: bool,
    ) -> Result<Option<T>> {
        self.send(ApiRequest::new(Method::GET, path).requires_auth(requires_auth))
            .await
    }

    pub async fn post_json<T, B>(
        &self,
        path: &str,
        body: &B,
        requires_auth: bool,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::new(Method::POST, path)
            .json(body)?
            .requires_auth(requires_auth);
        self.send(request).await
    }

    pub async fn put_json<T, B>(
        &self,
        path: &str,
        body: &B,
        requires_auth: bool,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::new(Method::PUT, path)
            .json(body)?
            .requires_auth(requires_auth);
        self.send(request).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        requires_auth: bool,
    ) -> Result<Option<T>> {
        let request = ApiRequest::new(Method::POST, path)
            .multipart(form)
            .requires_auth(requires_auth);
        self.send(request).await
    }

    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        requires_auth: bool,
    ) -> Result<Option<T>> {
        let request = ApiRequest::new(Method::PUT, path)
            .multipart(form)
            .requires_auth(requires_auth);
        self.send(request).await
    }

    /// DELETE, discarding any body.
    pub async fn delete(&self, path: &str, requires_auth: bool) -> Result<()> {
        self.send::<serde_json::Value>(
            ApiRequest::new(Method::DELETE, path).requires_auth(requires_auth),
        )
        .await?;
        Ok(())
    }

    async fn read_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: Response,
    ) -> Result<Option<T>> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            warn!(status = %status, path = %path, message = %message, "Request failed");
            return Err(ClientError::Transport {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        if !is_json {
            return Ok(None);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.diagnostics.report(NonFatal::MalformedBody {
                    path: path.to_string(),
                    detail: e.to_string(),
                });
                Ok(None)
            }
        }
    }
}

/// Human-readable message for a failed response: the body's `error` field,
/// else its `detail` field, else the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "detail"].iter().find_map(|field| {
                value
                    .get(field)
                    .and_then(serde_json::Value::as_str)
                    .filter(|msg| !msg.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| format!("HTTP error! status: {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_preferred() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"error": "Username already exists.", "detail": "ignored"}"#,
        );
        assert_eq!(msg, "Username already exists.");
    }

    #[test]
    fn test_detail_field_used() {
        let msg = error_message(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "Given token not valid for any token type"}"#,
        );
        assert_eq!(msg, "Given token not valid for any token type");
    }

    #[test]
    fn test_empty_error_falls_through_to_detail() {
        let msg = error_message(StatusCode::FORBIDDEN, r#"{"error": "", "detail": "Forbidden"}"#);
        assert_eq!(msg, "Forbidden");
    }

    #[test]
    fn test_status_line_fallback() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "HTTP error! status: 500 Internal Server Error"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"["Sound is already in favorites."]"#),
            "HTTP error! status: 400 Bad Request"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, ""),
            "HTTP error! status: 404 Not Found"
        );
    }
}
