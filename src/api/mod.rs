//! Dossier Backend API
//!
//! Client side of the backend's HTTP surface. The backend owns and persists
//! all records; this layer only issues calls and maps the wire formats.
//!
//! # Endpoints
//!
//! - `POST /login` - exchange credentials for a bearer token
//! - `POST /hello` - submit a greeting (bearer token required)
//! - `GET /greetings` - list greeting records (bearer token required)
//! - `POST /people` - create a person record (bearer token required)
//! - `GET /people` - list person records (bearer token required)
//! - `GET /health` - unauthenticated status probe

pub mod client;
pub mod dto;
pub mod error;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use dto::{
    Greeting, HealthResponse, HelloRequest, HelloResponse, LoginRequest, Person, PersonCreate,
    TokenResponse,
};
pub use error::{ApiError, ApiResult};
