//! Saved request store - one JSON file, rewritten in full on every save

use std::fs;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use chrono::Utc;
use tracing::warn;

use crate::constants::{CONFIG_DIR, STORE_FILE};
use crate::models::Request;

/// Default store location under the user's home directory.
pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(STORE_FILE)
}

/// Ordered collection of saved requests backed by a single JSON file.
///
/// The file is read once at construction; afterwards the in-memory sequence
/// is authoritative and every save rewrites the file in full. List positions
/// are 1-based and recomputed on every listing, never persisted.
pub struct Store {
    path: PathBuf,
    requests: Vec<Request>,
}

impl Store {
    /// Load the store, treating a missing file as empty.
    ///
    /// An unparsable file is logged and dropped rather than surfaced; the
    /// next save overwrites it.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let requests = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(requests) => requests,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "store file unreadable, starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Store { path, requests }
    }

    /// Stamp a transient request, append it, and persist the whole sequence.
    pub fn append(&mut self, mut request: Request) -> Result<&Request> {
        ensure!(
            request.is_transient(),
            "request '{}' is already saved",
            request.name
        );
        request.timestamp = Some(Utc::now());
        self.requests.push(request);
        self.persist()?;
        Ok(&self.requests[self.requests.len() - 1])
    }

    /// Rewrite the backing file from the in-memory sequence.
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let data = serde_json::to_string_pretty(&self.requests)?;
        fs::write(&self.path, data)
            .with_context(|| format!("writing store file {}", self.path.display()))?;
        Ok(())
    }

    /// Saved requests in save order.
    pub fn list(&self) -> &[Request] {
        &self.requests
    }

    /// Look up a request by its 1-based list position.
    pub fn get(&self, position: usize) -> Option<&Request> {
        position.checked_sub(1).and_then(|i| self.requests.get(i))
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
