//! The `document.cookie` facade.
//!
//! [`CookieStore`] turns read/write/remove/exists calls into the host's two
//! primitives. Every operation first checks the host's capability flag and
//! degrades to `None`/`false` when cookies are disabled; nothing is assigned in
//! that case.
//!
//! ## Reading
//! The host string is split on `;`. For each segment the text before the first
//! `=` (trimmed) is the name and the text after it the percent-encoded value.
//! Names match exactly and case-sensitively, and the first matching segment in
//! host order wins. Segments without `=` carry no name and are skipped.
//!
//! ## Writing
//! `name=<encoded value>[; path=P][; expires=E]` is assigned in one call. The
//! expiry is only appended for a positive day count, so zero or negative days
//! produce a session cookie.

use time::OffsetDateTime;

use crate::config::CookieConfig;
use crate::cookies::codec::{decode_value, encode_value, expiry_after, format_expires, EPOCH_EXPIRES};
use crate::cookies::host::CookieHostHandle;

/// Cookie accessor bound to one injected host.
#[derive(Clone)]
pub struct CookieStore {
    host: CookieHostHandle,
    config: CookieConfig,
}

impl CookieStore {
    /// Creates a facade over `host` with the default expiry (365 days) and path (`"/"`).
    pub fn new(host: CookieHostHandle) -> Self {
        Self::with_config(host, CookieConfig::default())
    }

    pub fn with_config(host: CookieHostHandle, config: CookieConfig) -> Self {
        Self { host, config }
    }

    pub fn config(&self) -> &CookieConfig {
        &self.config
    }

    /// Whether the host permits cookie storage.
    pub fn is_enabled(&self) -> bool {
        self.host.cookie_enabled()
    }

    /// Returns the decoded value of the first cookie named `name`.
    pub fn read(&self, name: &str) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }

        self.host
            .cookie_string()
            .split(';')
            .filter_map(|segment| segment.split_once('='))
            .find(|(n, _)| n.trim() == name)
            .map(|(_, value)| decode_value(value))
    }

    /// Writes `name=value` with the configured expiry and path.
    pub fn write(&self, name: &str, value: &str) -> bool {
        self.write_with(name, value, None, None)
    }

    /// Writes `name=value`, overriding the configured expiry and/or path.
    ///
    /// `None` or an empty path falls back to the configured path. A path holding
    /// `;` is refused, as [`CookieConfig`] refuses it, since it would smuggle extra
    /// attributes into the assignment. Returns `false` if cookies are disabled, the
    /// path is refused, or the host rejected the assignment.
    pub fn write_with(
        &self,
        name: &str,
        value: &str,
        days_to_expire: Option<i64>,
        path: Option<&str>,
    ) -> bool {
        if !self.is_enabled() {
            return false;
        }

        let days = days_to_expire.unwrap_or(self.config.days_to_expire);
        let path = path.filter(|p| !p.is_empty()).unwrap_or(self.config.path.as_str());
        if path.contains(';') {
            log::warn!("Refusing cookie {name}: path {path:?} contains ';'");
            return false;
        }

        let mut assignment = format!("{name}={}", encode_value(value));

        if !path.is_empty() {
            assignment.push_str("; path=");
            assignment.push_str(path);
        }

        if days > 0 {
            let at = expiry_after(OffsetDateTime::now_utc(), days);
            match format_expires(at) {
                Ok(expires) => {
                    assignment.push_str("; expires=");
                    assignment.push_str(&expires);
                }
                Err(e) => {
                    log::warn!("Cannot format expiry for cookie {name}: {e}");
                    return false;
                }
            }
        }

        self.assign(name, &assignment)
    }

    /// Expires the cookie named `name`. `false` if it does not exist.
    pub fn remove(&self, name: &str) -> bool {
        if !self.is_enabled() || !self.exists(name) {
            return false;
        }

        self.assign(name, &format!("{name}=; expires={EPOCH_EXPIRES};"))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.read(name).is_some()
    }

    fn assign(&self, name: &str, assignment: &str) -> bool {
        match self.host.set_cookie(assignment) {
            Ok(()) => {
                log::debug!("Assigned cookie {name}");
                true
            }
            Err(e) => {
                log::warn!("Host rejected cookie {name}: {e}");
                false
            }
        }
    }
}
