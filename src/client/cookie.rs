use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const LIFETIME_DAYS: i64 = 30;

#[derive(Error, Debug)]
pub enum CookieError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed cookie: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Remembers the last password that was accepted.
pub trait PasswordStore {
    fn load(&self) -> Result<Option<String>, CookieError>;
    fn save(&mut self, password: &str) -> Result<(), CookieError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Stored {
    password: String,
    expires: DateTime<Utc>,
}

/// A file-backed cookie that expires thirty days after it was written.
#[derive(Debug, Clone)]
pub struct PasswordCookie {
    path: PathBuf,
}

impl PasswordCookie {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_at(&self, now: DateTime<Utc>) -> Result<Option<String>, CookieError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: Stored = serde_json::from_str(&data)?;
        Ok((stored.expires > now).then_some(stored.password))
    }

    fn save_at(&self, password: &str, now: DateTime<Utc>) -> Result<(), CookieError> {
        let stored = Stored {
            password: password.to_string(),
            expires: now + Duration::days(LIFETIME_DAYS),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }
}

impl PasswordStore for PasswordCookie {
    fn load(&self) -> Result<Option<String>, CookieError> {
        self.load_at(Utc::now())
    }

    fn save(&mut self, password: &str) -> Result<(), CookieError> {
        self.save_at(password, Utc::now())
    }
}
