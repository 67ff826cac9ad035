//! Session State
//!
//! The bearer token for the current session, held only in memory. Two
//! states: unauthenticated and authenticated. The only transition back to
//! unauthenticated is an explicit [`reset`](Session::reset); a failed
//! protected call never changes the state.

/// Current session, constructed per console run (never global)
#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Start unauthenticated
    pub fn new() -> Self {
        Self::default()
    }

    /// The held token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Transition to authenticated with a freshly issued token
    pub fn authenticate(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Explicit logout; discards the token
    pub fn reset(&mut self) {
        self.token = None;
    }
}
