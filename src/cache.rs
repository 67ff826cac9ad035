//! Collection Cache
//!
//! Read-through store for backend collections. Each entry is keyed by the
//! collection name plus the token it was fetched under and carries a
//! staleness flag: a stale entry, or one fetched under a different token,
//! must be refetched on the next access.

/// Cached row set for one backend collection
#[derive(Debug)]
pub struct Cached<T> {
    collection: &'static str,
    token: Option<String>,
    rows: Vec<T>,
    stale: bool,
}

impl<T> Cached<T> {
    /// Create an empty, stale entry for the named collection
    pub fn new(collection: &'static str) -> Self {
        Self {
            collection,
            token: None,
            rows: Vec::new(),
            stale: true,
        }
    }

    /// Name of the collection this entry caches
    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// Rows for `token`, or `None` when the entry is stale or was fetched
    /// under a different token
    pub fn read(&self, token: &str) -> Option<&[T]> {
        if !self.stale && self.token.as_deref() == Some(token) {
            Some(&self.rows)
        } else {
            None
        }
    }

    /// Replace the rows with a fresh fetch made under `token`
    pub fn store(&mut self, token: &str, rows: Vec<T>) {
        self.token = Some(token.to_string());
        self.rows = rows;
        self.stale = false;
    }

    /// Mark the entry stale; rows stay until the next fetch replaces them
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Drop rows and key entirely (logout)
    pub fn clear(&mut self) {
        self.token = None;
        self.rows.clear();
        self.stale = true;
    }

    /// Whether the next read must refetch
    pub fn is_stale(&self) -> bool {
        self.stale
    }
}
