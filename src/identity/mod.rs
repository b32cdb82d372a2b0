//! Persistent user identity.
//!
//! The backend scopes chat history, mood results, and journal entries by an
//! opaque user identifier carried in the `X-User-ID` header. Rather than
//! keeping that identifier as ambient global state, it is loaded once at
//! startup and passed explicitly into the API client.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{IdentityError, IdentityResult};

/// Opaque per-user identifier persisted across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Load the identity from `path`, creating and persisting a fresh one if
    /// the file is missing.
    ///
    /// A file that exists but does not parse as a UUID is treated as corrupt:
    /// a warning is logged and a regenerated identity overwrites it.
    pub fn load_or_create(path: &Path) -> IdentityResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => match contents.trim().parse::<Uuid>() {
                Ok(id) => {
                    debug!(path = %path.display(), "Loaded user identity");
                    return Ok(Self(id));
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Identity file is corrupt, regenerating"
                    );
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(IdentityError::Read {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        }

        let id = Self::generate();
        id.persist(path)?;
        debug!(path = %path.display(), "Created new user identity");
        Ok(id)
    }

    /// Write the identity to `path`, creating parent directories as needed.
    pub fn persist(&self, path: &Path) -> IdentityResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| IdentityError::Write {
                    path: path.display().to_string(),
                    source: e,
                })?;
            }
        }
        fs::write(path, self.0.to_string()).map_err(|e| IdentityError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Canonical hyphenated form, as sent in the X-User-ID header
        write!(f, "{}", self.0)
    }
}
