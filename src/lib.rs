//! # Dossier
//!
//! Terminal client for the OSINT dossier backend: authenticate, submit
//! greeting and person records through a JSON API, and list the results.
//!
//! ## Design
//!
//! - **Request helper**: one generic call builder that attaches the JSON
//!   content type and an optional bearer token, and normalizes every failure
//!   into a single message-carrying error
//! - **Session**: the token lives only in memory for the life of the process
//! - **Collection caches**: read-through, keyed by collection name plus
//!   token, invalidated after each successful mutation
//! - **Notices**: every success and failure surfaces as a transient
//!   notification; no failure is fatal and nothing is retried
//!
//! ## Modules
//!
//! - [`api`]: HTTP client, wire types, and the error type
//! - [`session`]: session state machine
//! - [`cache`]: keyed collection cache
//! - [`dashboard`]: wiring between user actions and the API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dossier::{ApiClient, Dashboard, ListView};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut dashboard = Dashboard::new(ApiClient::new("http://localhost:8000"));
//!
//!     dashboard.login("admin", "admin").await;
//!     dashboard.say_hello("World").await;
//!
//!     if let ListView::Rows(greetings) = dashboard.greetings().await {
//!         println!("{} greetings on record", greetings.len());
//!     }
//!
//!     for notice in dashboard.drain_notices() {
//!         println!("{}", notice.message());
//!     }
//! }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod session;

// Re-export top-level types for convenience
pub use api::{
    ApiClient, ApiError, ApiResult, Greeting, HealthResponse, HelloRequest, HelloResponse,
    LoginRequest, Person, PersonCreate, TokenResponse, DEFAULT_BASE_URL,
};

pub use cache::Cached;

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};

pub use dashboard::{Dashboard, ListView, Notice};

pub use session::Session;
