//! File-backed storage for the athlete's refresh token.

use std::{fs, path::PathBuf, sync::Mutex};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub athlete_id: u64,
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize)]
struct TokenFile {
    version: u32,
    token: Option<StoredToken>,
}

#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn load(&self) -> anyhow::Result<Option<StoredToken>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("Token store lock poisoned"))?;

        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if raw.is_empty() {
            return Ok(None);
        }

        let file: TokenFile = serde_json::from_slice(&raw)
            .with_context(|| format!("Malformed token file {}", self.path.display()))?;
        Ok(file.token)
    }

    pub fn save(&self, token: Option<StoredToken>) -> anyhow::Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("Token store lock poisoned"))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = TokenFile {
            version: CURRENT_VERSION,
            token,
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        self.save(None)
    }
}
