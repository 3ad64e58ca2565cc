use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use time::OffsetDateTime;
use url::Url;

use crate::cookies::host::CookieHost;
use crate::cookies::Cookie;

const DEFAULT_DOCUMENT_URL: &str = "http://localhost/";

/// In-process cookie host for a single document.
///
/// Cookies live in a flat list keyed by name, in the order they were first
/// assigned. Overwriting a cookie keeps its position. Expired cookies are evicted
/// on assignment and purged lazily on read.
///
/// Only cookies whose path is a prefix of the document URL's path are visible
/// through [`CookieHost::cookie_string`]. An assignment without a path gets the
/// directory of the document path.
pub struct InMemoryCookieHost {
    document_url: Url,
    enabled: AtomicBool,
    cookies: RwLock<Vec<Cookie>>,
}

impl Default for InMemoryCookieHost {
    fn default() -> Self {
        let url = Url::parse(DEFAULT_DOCUMENT_URL).expect("default document URL is valid");
        Self::new(url)
    }
}

impl InMemoryCookieHost {
    /// Creates an empty host for the document at `document_url`.
    pub fn new(document_url: Url) -> Self {
        Self::with_cookies(document_url, Vec::new())
    }

    /// Creates a host pre-populated with `cookies`.
    pub fn with_cookies(document_url: Url, cookies: Vec<Cookie>) -> Self {
        Self {
            document_url,
            enabled: AtomicBool::new(true),
            cookies: RwLock::new(cookies),
        }
    }

    pub fn document_url(&self) -> &Url {
        &self.document_url
    }

    /// Toggles the capability flag (e.g. user privacy settings).
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Snapshot of every stored cookie, including ones not visible to the document path.
    pub fn cookies(&self) -> Vec<Cookie> {
        self.read_lock().clone()
    }

    pub fn clear(&self) {
        self.write_lock().clear();
    }

    /// Merges `assignment` into a copy of the list and hands it to `commit`.
    ///
    /// The copy only replaces the live list when `commit` succeeds, so a failed
    /// commit leaves no trace.
    pub(crate) fn set_cookie_then<F>(&self, assignment: &str, commit: F) -> anyhow::Result<()>
    where
        F: FnOnce(&[Cookie]) -> anyhow::Result<()>,
    {
        let mut cookie = Cookie::parse_assignment(assignment)?;
        if cookie.path.as_deref().map_or(true, str::is_empty) {
            cookie.path = Some(self.default_path().to_string());
        }

        let mut cookies = self.write_lock();
        let mut next = cookies.clone();
        merge(&mut next, cookie);

        commit(&next)?;
        *cookies = next;
        Ok(())
    }

    fn default_path(&self) -> &str {
        self.document_url
            .path()
            .rsplit_once('/')
            .map_or("/", |(dir, _)| if dir.is_empty() { "/" } else { dir })
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, Vec<Cookie>> {
        self.cookies.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, Vec<Cookie>> {
        self.cookies.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CookieHost for InMemoryCookieHost {
    fn cookie_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn cookie_string(&self) -> String {
        let now = OffsetDateTime::now_utc();
        let path = self.document_url.path();

        let mut cookies = self.write_lock();
        cookies.retain(|c| !c.is_expired(now));

        cookies
            .iter()
            .filter(|c| c.path_matches(path))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn set_cookie(&self, assignment: &str) -> anyhow::Result<()> {
        self.set_cookie_then(assignment, |_| Ok(()))
    }
}

// Adds, overwrites in place, or evicts when `cookie` is already expired.
fn merge(cookies: &mut Vec<Cookie>, cookie: Cookie) {
    if cookie.is_expired(OffsetDateTime::now_utc()) {
        log::debug!("Evicting cookie {}", cookie.name);
        cookies.retain(|c| c.name != cookie.name);
        return;
    }

    // Replace existing cookie with same name
    if let Some(existing) = cookies.iter_mut().find(|c| c.name == cookie.name) {
        *existing = cookie;
    } else {
        cookies.push(cookie);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_at(url: &str) -> InMemoryCookieHost {
        InMemoryCookieHost::new(Url::parse(url).unwrap())
    }

    #[test]
    fn starts_empty_and_enabled() {
        let host = InMemoryCookieHost::default();
        assert!(host.cookie_enabled());
        assert_eq!(host.cookie_string(), "");
    }

    #[test]
    fn overwrite_keeps_position() {
        let host = InMemoryCookieHost::default();
        host.set_cookie("a=1").unwrap();
        host.set_cookie("b=2").unwrap();
        host.set_cookie("a=3").unwrap();
        assert_eq!(host.cookie_string(), "a=3; b=2");
    }

    #[test]
    fn past_expiry_evicts() {
        let host = InMemoryCookieHost::default();
        host.set_cookie("a=1").unwrap();
        host.set_cookie("b=2").unwrap();
        host.set_cookie("a=; expires=Thu, 01-Jan-70 00:00:01 GMT;").unwrap();
        assert_eq!(host.cookie_string(), "b=2");
        assert_eq!(host.cookies().len(), 1);
    }

    #[test]
    fn expired_cookies_are_purged_on_read() {
        let stale = Cookie::parse_assignment("old=1; path=/; expires=Thu, 01 Jan 2015 00:00:00 GMT").unwrap();
        let fresh = Cookie::parse_assignment("new=2; path=/").unwrap();
        let host = InMemoryCookieHost::with_cookies(Url::parse(DEFAULT_DOCUMENT_URL).unwrap(), vec![stale, fresh]);

        assert_eq!(host.cookies().len(), 2);
        assert_eq!(host.cookie_string(), "new=2");
        assert_eq!(host.cookies().len(), 1);
        assert_eq!(host.cookies()[0].name, "new");
    }

    #[test]
    fn failed_commit_leaves_list_untouched() {
        let host = InMemoryCookieHost::default();
        host.set_cookie("a=1").unwrap();

        let result = host.set_cookie_then("b=2", |next| {
            assert_eq!(next.len(), 2);
            anyhow::bail!("commit refused")
        });

        assert!(result.is_err());
        assert_eq!(host.cookie_string(), "a=1");
    }

    #[test]
    fn evicting_unknown_cookie_is_a_no_op() {
        let host = InMemoryCookieHost::default();
        host.set_cookie("a=1").unwrap();
        host.set_cookie("zzz=; expires=Thu, 01-Jan-70 00:00:01 GMT;").unwrap();
        assert_eq!(host.cookie_string(), "a=1");
    }

    #[test]
    fn path_visibility_follows_document_url() {
        let host = host_at("https://example.com/app/page.html");
        host.set_cookie("root=1; path=/").unwrap();
        host.set_cookie("app=2; path=/app").unwrap();
        host.set_cookie("other=3; path=/other").unwrap();
        assert_eq!(host.cookie_string(), "root=1; app=2");
        assert_eq!(host.cookies().len(), 3);
    }

    #[test]
    fn missing_path_defaults_to_document_directory() {
        let host = host_at("https://example.com/app/page.html");
        host.set_cookie("a=1").unwrap();
        assert_eq!(host.cookies()[0].path.as_deref(), Some("/app"));

        let host = host_at("https://example.com/index.html");
        host.set_cookie("a=1").unwrap();
        assert_eq!(host.cookies()[0].path.as_deref(), Some("/"));
    }

    #[test]
    fn rejects_malformed_assignment() {
        let host = InMemoryCookieHost::default();
        assert!(host.set_cookie("no-equals-sign").is_err());
        assert_eq!(host.cookie_string(), "");
    }

    #[test]
    fn clear_and_toggle() {
        let host = InMemoryCookieHost::default();
        host.set_cookie("a=1").unwrap();
        host.clear();
        assert_eq!(host.cookie_string(), "");

        host.set_enabled(false);
        assert!(!host.cookie_enabled());
    }
}
