//! Cookie record kept by the in-process hosts.
//!
//! A [`Cookie`] is what a host stores after merging one assignment string such as
//! `"theme=dark; path=/; expires=Tue, 04 Mar 2025 05:06:07 GMT"`. The value is
//! kept exactly as assigned (still percent-encoded); decoding is the facade's job.
//!
//! ```rust
//! use document_cookie::cookies::Cookie;
//!
//! let c = Cookie::parse_assignment("theme=dark; path=/").unwrap();
//! assert_eq!(c.name, "theme");
//! assert_eq!(c.value, "dark");
//! assert_eq!(c.path.as_deref(), Some("/"));
//! assert!(c.expires.is_none());
//! ```

use crate::cookies::codec::parse_expires;
use crate::errors::CookieError;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A cookie as stored/serialized by a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name (case-sensitive).
    pub name: String,

    /// Raw cookie value (not percent-decoded).
    pub value: String,

    /// Path scoping. `None` until the host fills in its default.
    pub path: Option<String>,

    /// Absolute expiry. Session cookies have `None`.
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires: Option<OffsetDateTime>,
}

impl Cookie {
    /// Parses a `name=value(; attr)*` assignment.
    ///
    /// Only `path` and `expires` are honored; other attributes are skipped. An
    /// `expires` that is not a recognised date leaves the cookie a session cookie.
    pub fn parse_assignment(assignment: &str) -> Result<Self, CookieError> {
        let mut parts = assignment.split(';');
        let first = parts.next().unwrap_or_default();

        let Some((name, value)) = first.split_once('=') else {
            return Err(CookieError::InvalidAssignment(assignment.to_string()));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(CookieError::InvalidAssignment(assignment.to_string()));
        }

        let mut cookie = Cookie {
            name: name.to_string(),
            value: value.trim().to_string(),
            path: None,
            expires: None,
        };

        for part in parts {
            let part = part.trim();
            let Some((k, v)) = part.split_once('=') else {
                continue;
            };

            match k.trim().to_ascii_lowercase().as_str() {
                "path" => cookie.path = Some(v.trim().to_string()),
                "expires" => {
                    cookie.expires = parse_expires(v);
                    if cookie.expires.is_none() {
                        log::debug!("Ignoring unparsable expires {v:?} for cookie {}", cookie.name);
                    }
                }
                _ => {}
            }
        }

        Ok(cookie)
    }

    /// True when the cookie carries an expiry at or before `now`.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }

    /// True when the cookie is visible to a document at `document_path`.
    ///
    /// The cookie path must be a prefix that ends on a `/` boundary, so `/app`
    /// covers `/app` and `/app/page` but not `/application`.
    pub fn path_matches(&self, document_path: &str) -> bool {
        let Some(cookie_path) = self.path.as_deref() else {
            return true;
        };

        match document_path.strip_prefix(cookie_path) {
            Some(rest) => cookie_path.ends_with('/') || rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_value_and_attributes() {
        let c = Cookie::parse_assignment(
            "token=a%20b; Path=/app; EXPIRES=Tue, 04 Mar 2025 05:06:07 GMT",
        )
        .unwrap();
        assert_eq!(c.name, "token");
        assert_eq!(c.value, "a%20b");
        assert_eq!(c.path.as_deref(), Some("/app"));
        assert_eq!(c.expires, Some(datetime!(2025-03-04 05:06:07 UTC)));
    }

    #[test]
    fn removal_assignment_has_epoch_expiry_and_empty_value() {
        let c = Cookie::parse_assignment("gone=; expires=Thu, 01-Jan-70 00:00:01 GMT;").unwrap();
        assert_eq!(c.value, "");
        assert!(c.is_expired(OffsetDateTime::now_utc()));
    }

    #[test]
    fn unknown_attributes_and_flags_are_skipped() {
        let c = Cookie::parse_assignment("a=b; Secure; SameSite=Lax; domain=example.com").unwrap();
        assert_eq!(c.value, "b");
        assert!(c.path.is_none());
        assert!(c.expires.is_none());
    }

    #[test]
    fn bad_expires_means_session_cookie() {
        let c = Cookie::parse_assignment("a=b; expires=soon").unwrap();
        assert!(c.expires.is_none());
    }

    #[test]
    fn rejects_assignment_without_name() {
        assert!(matches!(
            Cookie::parse_assignment("novalue"),
            Err(CookieError::InvalidAssignment(_))
        ));
        assert!(matches!(
            Cookie::parse_assignment("=value"),
            Err(CookieError::InvalidAssignment(_))
        ));
    }

    #[test]
    fn path_matching_respects_segment_boundaries() {
        let mut c = Cookie::parse_assignment("a=b; path=/app").unwrap();
        assert!(c.path_matches("/app"));
        assert!(c.path_matches("/app/page"));
        assert!(!c.path_matches("/other"));
        assert!(!c.path_matches("/application"));

        c.path = Some("/app/".into());
        assert!(c.path_matches("/app/page"));
        assert!(!c.path_matches("/app"));

        c.path = Some("/".into());
        assert!(c.path_matches("/anything"));
        c.path = None;
        assert!(c.path_matches("/other"));
    }
}
