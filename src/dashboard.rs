//! Dashboard Wiring
//!
//! Owns the session, the collection caches, and the notice feed, and drives
//! every user action through the API client. Failures never propagate out of
//! an operation: each one becomes an error notice and the session state is
//! left untouched, including on an expired or invalid token.

use std::collections::VecDeque;

use crate::api::client::ApiClient;
use crate::api::dto::{Greeting, HelloRequest, LoginRequest, Person, PersonCreate};
use crate::cache::Cached;
use crate::session::Session;

/// Transient user-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Result of a collection read
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    /// No token held; the read was disabled and no call was issued
    AuthRequired,
    Rows(Vec<T>),
}

impl<T> ListView<T> {
    /// Rows when loaded, empty for the authentication-required state
    pub fn rows(&self) -> &[T] {
        match self {
            ListView::AuthRequired => &[],
            ListView::Rows(rows) => rows,
        }
    }
}

/// Session, caches, and operations behind the console
pub struct Dashboard {
    client: ApiClient,
    session: Session,
    greetings: Cached<Greeting>,
    people: Cached<Person>,
    notices: VecDeque<Notice>,
}

impl Dashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            session: Session::new(),
            greetings: Cached::new("greetings"),
            people: Cached::new("people"),
            notices: VecDeque::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Take all pending notices, oldest first
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Submit credentials; on success store the token and invalidate the
    /// protected collections so they refetch under it. A failed login leaves
    /// any prior token untouched.
    pub async fn login(&mut self, username: &str, password: &str) {
        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        match self.client.login(&credentials).await {
            Ok(response) => {
                self.session.authenticate(response.access_token);
                self.greetings.invalidate();
                self.people.invalidate();
                tracing::info!(username, "logged in");
                self.notify_success("Logged in");
            }
            Err(error) => {
                tracing::warn!(username, error = %error, "login failed");
                self.notify_error(error.message);
            }
        }
    }

    /// Clear the token and discard all cached collections; no network call
    pub fn logout(&mut self) {
        self.session.reset();
        self.greetings.clear();
        self.people.clear();
        tracing::info!("logged out");
    }

    /// Say hello; the backend creates a greeting record, so the greetings
    /// list is invalidated on success. Requires a token.
    pub async fn say_hello(&mut self, name: &str) {
        let Some(token) = self.session.token().map(str::to_owned) else {
            self.notify_error("Authentication required");
            return;
        };

        let request = HelloRequest {
            name: name.to_string(),
        };

        match self.client.hello(&request, &token).await {
            Ok(response) => {
                self.greetings.invalidate();
                self.notify_success(response.message);
            }
            Err(error) => {
                tracing::warn!(error = %error, "hello failed");
                self.notify_error(error.message);
            }
        }
    }

    /// Create a person record and invalidate the people list on success.
    /// Requires a token. The new record is never inserted optimistically;
    /// the next read refetches.
    pub async fn create_person(&mut self, person: PersonCreate) {
        let Some(token) = self.session.token().map(str::to_owned) else {
            self.notify_error("Authentication required");
            return;
        };

        match self.client.create_person(&person, &token).await {
            Ok(created) => {
                self.people.invalidate();
                self.notify_success(format!("Added {}", created.full_name));
            }
            Err(error) => {
                tracing::warn!(error = %error, "create person failed");
                self.notify_error(error.message);
            }
        }
    }

    /// Read-through greetings list
    pub async fn greetings(&mut self) -> ListView<Greeting> {
        let Some(token) = self.session.token().map(str::to_owned) else {
            return ListView::AuthRequired;
        };

        if let Some(rows) = self.greetings.read(&token) {
            return ListView::Rows(rows.to_vec());
        }

        match self.client.greetings(&token).await {
            Ok(rows) => {
                self.greetings.store(&token, rows.clone());
                ListView::Rows(rows)
            }
            Err(error) => {
                // Entry stays stale; the next access refetches
                tracing::warn!(error = %error, "greetings fetch failed");
                self.notify_error(error.message);
                ListView::Rows(Vec::new())
            }
        }
    }

    /// Read-through people list
    pub async fn people(&mut self) -> ListView<Person> {
        let Some(token) = self.session.token().map(str::to_owned) else {
            return ListView::AuthRequired;
        };

        if let Some(rows) = self.people.read(&token) {
            return ListView::Rows(rows.to_vec());
        }

        match self.client.people(&token).await {
            Ok(rows) => {
                self.people.store(&token, rows.clone());
                ListView::Rows(rows)
            }
            Err(error) => {
                tracing::warn!(error = %error, "people fetch failed");
                self.notify_error(error.message);
                ListView::Rows(Vec::new())
            }
        }
    }

    /// Unauthenticated backend probe
    pub async fn health(&mut self) -> bool {
        match self.client.health().await {
            Ok(health) => {
                self.notify_success(format!("Backend status: {}", health.status));
                true
            }
            Err(error) => {
                self.notify_error(error.message);
                false
            }
        }
    }

    fn notify_success(&mut self, message: impl Into<String>) {
        self.notices.push_back(Notice::Success(message.into()));
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.notices.push_back(Notice::Error(message.into()));
    }
}
