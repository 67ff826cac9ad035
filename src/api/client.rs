//! Backend REST API Client
//!
//! HTTP client for the dossier backend. Every endpoint goes through one
//! generic request helper that sets the JSON content type, attaches the
//! bearer token when one is supplied, and normalizes failures into
//! [`ApiError`](super::error::ApiError).

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::dto::{
    Greeting, HealthResponse, HelloRequest, HelloResponse, LoginRequest, Person, PersonCreate,
    TokenResponse,
};
use super::error::{ApiError, ApiResult};

/// Default backend address for local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Dossier backend API client
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (trailing slash trimmed)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one call against `base_url + path`.
    ///
    /// Sets `Content-Type: application/json` on every request and an
    /// `Authorization: Bearer <token>` header iff a token was supplied. A
    /// successful response is parsed as JSON into `T`; the declared type is
    /// trusted, no further validation happens. A failing response yields the
    /// body text as the error message, falling back to the status
    /// description when the body cannot be read or is empty. No retries, no
    /// distinction between failure causes.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = match response.text().await {
                Ok(text) if !text.is_empty() => text,
                _ => status.to_string(),
            };
            Err(ApiError::new(message))
        }
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<TokenResponse> {
        self.request(Method::POST, "/login", Some(credentials), None)
            .await
    }

    /// Submit a greeting; the backend creates the record
    pub async fn hello(&self, request: &HelloRequest, token: &str) -> ApiResult<HelloResponse> {
        self.request(Method::POST, "/hello", Some(request), Some(token))
            .await
    }

    /// List the greetings history
    pub async fn greetings(&self, token: &str) -> ApiResult<Vec<Greeting>> {
        self.request(Method::GET, "/greetings", None::<&()>, Some(token))
            .await
    }

    /// Create a person record
    pub async fn create_person(&self, person: &PersonCreate, token: &str) -> ApiResult<Person> {
        self.request(Method::POST, "/people", Some(person), Some(token))
            .await
    }

    /// List the people records
    pub async fn people(&self, token: &str) -> ApiResult<Vec<Person>> {
        self.request(Method::GET, "/people", None::<&()>, Some(token))
            .await
    }

    /// Unauthenticated backend probe
    pub async fn health(&self) -> ApiResult<HealthResponse> {
        self.request(Method::GET, "/health", None::<&()>, None).await
    }
}
