// gigcli/src/token_store.rs
//! Persisted bearer token
//!
//! The CLI equivalent of the browser's `token` local-storage key: one token,
//! one file, read before every request.

use anyhow::Result;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Default location: `~/.gigcli/token`, overridable with GIGCLI_TOKEN_FILE
    pub fn from_env() -> Self {
        let path = env::var("GIGCLI_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                home::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".gigcli")
                    .join("token")
            });
        Self { path }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the stored token, if any
    pub fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> TokenStore {
        let path = std::env::temp_dir()
            .join(format!("gigcli-test-{}-{}", std::process::id(), name))
            .join("token");
        TokenStore::with_path(path)
    }

    #[test]
    fn test_load_returns_none_without_a_saved_token() {
        let store = temp_store("load-none");
        store.clear().expect("Clear failed");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let store = temp_store("round-trip");
        store.save("abc.def.ghi").expect("Save failed");
        assert_eq!(store.load(), Some("abc.def.ghi".to_string()));
        store.clear().expect("Clear failed");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = temp_store("clear-twice");
        store.save("abc").expect("Save failed");
        store.clear().expect("First clear failed");
        store.clear().expect("Second clear should also succeed");
    }
}
