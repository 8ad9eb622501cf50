use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use murmur_types::Token;

use crate::error::Result;

/// Client-side persistent storage for the session token.
///
/// Writing an empty string signs the client out.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Result<Option<Token>>;
    fn set(&self, value: &str) -> Result<()>;
}

/// Keeps the token in a single file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<Token>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Token::new(raw.trim_end_matches(['\r', '\n']))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, value: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, value)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    value: Mutex<String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            value: Mutex::new(token.to_string()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<Token>> {
        let value = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Token::new(value.clone()))
    }

    fn set(&self, value: &str) -> Result<()> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = value.to_string();
        Ok(())
    }
}
