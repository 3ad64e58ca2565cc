//! Cookie write defaults.
//!
//! `CookieConfig` holds the values [`CookieStore::write`](crate::cookies::CookieStore::write)
//! falls back to when the caller does not supply an expiry or a path.
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use document_cookie::config::CookieConfig;
//! let cfg = CookieConfig::default();
//! assert_eq!(cfg.days_to_expire, 365);
//! assert_eq!(cfg.path, "/");
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use document_cookie::config::CookieConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = CookieConfig::builder()
//!     .days_to_expire(30)
//!     .path("/app")
//!     .build()?; // returns Result<CookieConfig, CookieConfigError>
//! # Ok(()) }
//! ```
//!
//! # Fields
//! - `days_to_expire`: Days until a written cookie expires (default: 365). Zero or
//!   negative writes session cookies.
//! - `path`: Path attribute appended to writes (default: `"/"`). An empty path
//!   writes no path attribute at all, leaving the choice to the host.
//!
//! # Errors
//!
//! Builder validation returns [`CookieConfigError`] when the path would break the
//! serialized cookie string (it contains `;`) or is not absolute.

use std::fmt;

/// Days until expiry used when the caller gives none.
pub const DEFAULT_DAYS_TO_EXPIRE: i64 = 365;

/// Path used when the caller gives none.
pub const DEFAULT_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    pub days_to_expire: i64,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            days_to_expire: DEFAULT_DAYS_TO_EXPIRE,
            path: DEFAULT_PATH.to_string(),
        }
    }
}

impl CookieConfig {
    pub fn builder() -> CookieConfigBuilder {
        CookieConfigBuilder::default()
    }
}

/// Builder for [`CookieConfig`].
#[derive(Debug, Clone, Default)]
pub struct CookieConfigBuilder {
    inner: CookieConfig,
}

impl CookieConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut CookieConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn days_to_expire(self, days: i64) -> Self { self.map(|c| c.days_to_expire = days) }
    pub fn path<S: Into<String>>(self, path: S) -> Self { self.map(|c| c.path = path.into()) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<CookieConfig, CookieConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieConfigError {
    PathContainsSeparator(String),
    RelativePath(String),
}

impl fmt::Display for CookieConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieConfigError::PathContainsSeparator(p) =>
                write!(f, "path {p:?} contains ';'"),
            CookieConfigError::RelativePath(p) =>
                write!(f, "path {p:?} must start with '/'"),
        }
    }
}
impl std::error::Error for CookieConfigError {}

fn validate(c: &CookieConfig) -> Result<(), CookieConfigError> {
    if c.path.contains(';') {
        return Err(CookieConfigError::PathContainsSeparator(c.path.clone()));
    }
    if !c.path.is_empty() && !c.path.starts_with('/') {
        return Err(CookieConfigError::RelativePath(c.path.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_document_cookie_conventions() {
        let cfg = CookieConfig::default();
        assert_eq!(cfg.days_to_expire, 365);
        assert_eq!(cfg.path, "/");
    }

    #[test]
    fn builder_accepts_empty_path() {
        let cfg = CookieConfig::builder().path("").days_to_expire(0).build().unwrap();
        assert_eq!(cfg.path, "");
        assert_eq!(cfg.days_to_expire, 0);
    }

    #[test]
    fn builder_rejects_bad_paths() {
        assert_eq!(
            CookieConfig::builder().path("/a;b").build(),
            Err(CookieConfigError::PathContainsSeparator("/a;b".into()))
        );
        assert_eq!(
            CookieConfig::builder().path("app").build(),
            Err(CookieConfigError::RelativePath("app".into()))
        );
    }
}
