//! File-based Session Store Adapter
//!
//! Stores one JSON file per session under a base directory. File names are
//! the hex encoding of the identity, so any identity maps to a safe name and
//! can be recovered from it.

use async_trait::async_trait;
use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::Identity;
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

const EXTENSION: &str = "json";

/// File-based storage for intake sessions
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store rooted at `base_path`.
    ///
    /// The directory is created on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub(crate) fn session_path(&self, identity: &Identity) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", encode_identity(identity), EXTENSION))
    }

    async fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }
}

fn encode_identity(identity: &Identity) -> String {
    identity
        .as_str()
        .bytes()
        .fold(String::new(), |mut out, byte| {
            let _ = write!(out, "{:02x}", byte);
            out
        })
}

fn decode_identity(stem: &str) -> Option<Identity> {
    if stem.len() % 2 != 0 {
        return None;
    }
    let bytes = (0..stem.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(stem.get(i..i + 2)?, 16).ok())
        .collect::<Option<Vec<u8>>>()?;
    let raw = String::from_utf8(bytes).ok()?;
    Identity::new(raw).ok()
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, identity: &Identity) -> Result<Option<IntakeSession>, SessionStoreError> {
        let json = match fs::read_to_string(self.session_path(identity)).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::IoError(e.to_string())),
        };

        let session = serde_json::from_str(&json)
            .map_err(|e| SessionStoreError::DeserializationFailed(e.to_string()))?;
        Ok(Some(session))
    }

    async fn store(&self, session: &IntakeSession) -> Result<(), SessionStoreError> {
        self.ensure_dir().await?;

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        // Write to a sibling temp file, then rename over the target.
        let path = self.session_path(session.identity());
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, identity: &Identity) -> Result<(), SessionStoreError> {
        match fs::remove_file(self.session_path(identity)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionStoreError::IoError(e.to_string())),
        }
    }

    async fn identities(&self) -> Result<Vec<Identity>, SessionStoreError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SessionStoreError::IoError(e.to_string())),
        };

        let mut identities = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(identity) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(decode_identity)
            {
                identities.push(identity);
            }
        }
        identities.sort();
        Ok(identities)
    }
}
