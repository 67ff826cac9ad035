//! Data Transfer Objects
//!
//! Request and response types for the backend endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// AUTH DTOs
// ============================================

/// Credentials for `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token issued by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque bearer token, held in memory for the session
    pub access_token: String,
}

// ============================================
// GREETING DTOs
// ============================================

/// Body for `POST /hello`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloRequest {
    pub name: String,
}

/// Confirmation returned by `POST /hello`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloResponse {
    pub message: String,
}

/// A greeting record, created by the backend in response to a hello
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greeting {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ============================================
// PEOPLE DTOs
// ============================================

/// Body for `POST /people`
///
/// Optional fields are omitted from the JSON body when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonCreate {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PersonCreate {
    /// Create a request with only the required full name
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    /// Set the contact handle
    pub fn telegram(mut self, telegram: impl Into<String>) -> Self {
        self.telegram = Some(telegram.into());
        self
    }

    /// Set the photo reference
    pub fn photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    /// Set the free-text note
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A person record as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Response from `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status: "ok"
    pub status: String,
}
