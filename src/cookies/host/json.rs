//! JSON-backed cookie host.
//!
//! `JsonCookieHost` wraps an [`InMemoryCookieHost`] and writes the whole cookie
//! list to a single JSON file after **every** successful assignment, so cookies
//! outlive the process the way a browser profile's cookies do.
//!
//! ### I/O characteristics & caveats
//! - Each assignment rewrites the entire file. File writes are not atomic.
//! - A file that fails to deserialize is treated as empty (a warning is logged)
//!   and is overwritten on the next assignment.
//!
//! ### Example
//! ```rust,no_run
//! use document_cookie::cookies::{CookieStore, JsonCookieHost};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let url = url::Url::parse("https://example.com/")?;
//! let host = JsonCookieHost::open("cookies.json".into(), url)?;
//! let cookies = CookieStore::new(host);
//! cookies.write("session", "abc123");
//! # Ok(()) }
//! ```
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::cookies::host::{CookieHost, InMemoryCookieHost};
use crate::cookies::Cookie;
use crate::errors::CookieError;

/// On-disk representation of the host's cookies.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CookieFile {
    cookies: Vec<Cookie>,
}

/// A JSON-file cookie host that persists cookies across sessions.
pub struct JsonCookieHost {
    /// Path to the JSON file where cookies are stored.
    path: PathBuf,

    /// Live cookie state; the file mirrors it after each assignment.
    inner: InMemoryCookieHost,
}

impl JsonCookieHost {
    /// Opens (or creates) a JSON cookie host at `path` for the document at `document_url`.
    ///
    /// If the file does not exist, an empty cookie list is written to disk.
    pub fn open(path: PathBuf, document_url: Url) -> Result<Arc<Self>, CookieError> {
        let file = if path.exists() {
            load_file(&path)?
        } else {
            let empty = CookieFile::default();
            save_file(&path, &empty)?;
            empty
        };

        log::debug!("Opened cookie file {} with {} cookies", path.display(), file.cookies.len());

        Ok(Arc::new(Self {
            path,
            inner: InMemoryCookieHost::with_cookies(document_url, file.cookies),
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory host holding the live state.
    pub fn inner(&self) -> &InMemoryCookieHost {
        &self.inner
    }

    /// Writes the current cookie list to disk.
    pub fn persist(&self) -> Result<(), CookieError> {
        save_file(&self.path, &CookieFile { cookies: self.inner.cookies() })
    }
}

impl CookieHost for JsonCookieHost {
    fn cookie_enabled(&self) -> bool {
        self.inner.cookie_enabled()
    }

    fn cookie_string(&self) -> String {
        self.inner.cookie_string()
    }

    /// Merges `assignment` and writes the result to disk.
    ///
    /// The merged list only goes live once the file write succeeded.
    fn set_cookie(&self, assignment: &str) -> anyhow::Result<()> {
        self.inner.set_cookie_then(assignment, |next| {
            save_file(&self.path, &CookieFile { cookies: next.to_vec() })?;
            Ok(())
        })
    }
}

/// Loads and deserializes the cookie file. Returns an empty list if the contents are not valid.
fn load_file(path: &Path) -> Result<CookieFile, CookieError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents).unwrap_or_else(|e| {
        log::warn!("Cookie file {} is corrupt, starting empty: {e}", path.display());
        CookieFile::default()
    }))
}

/// Serializes and writes the cookie file (pretty-printed).
fn save_file(path: &Path, file: &CookieFile) -> Result<(), CookieError> {
    let contents = serde_json::to_string_pretty(file)?;
    fs::write(path, contents)?;
    Ok(())
}
