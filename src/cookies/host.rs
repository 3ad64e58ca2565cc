//! Cookie host infrastructure.
//!
//! A **cookie host** is the environment that owns the ambient cookie store, the
//! thing a browser exposes as `document.cookie` and `navigator.cookieEnabled`.
//! The [`CookieStore`](crate::cookies::CookieStore) facade never stores cookies
//! itself; it only serializes into and parses out of the host's two primitives:
//! - read the full `"name1=value1; name2=value2"` string, and
//! - assign one `"name=value[; path=P][; expires=E]"` string, leaving the
//!   add/overwrite/evict merge to the host.
//!
//! This module exports two reference implementations:
//! - [`InMemoryCookieHost`]: in-process host bound to a document URL.
//! - [`JsonCookieHost`]: the same host, persisted to a JSON file after each assignment.
//!
//! ## Example: injecting a host
//! ```rust
//! use std::sync::Arc;
//! use document_cookie::cookies::{CookieStore, InMemoryCookieHost};
//!
//! let host = Arc::new(InMemoryCookieHost::default());
//! let cookies = CookieStore::new(host.clone());
//!
//! assert!(cookies.write("theme", "dark mode"));
//! assert_eq!(cookies.read("theme").as_deref(), Some("dark mode"));
//! ```
mod in_memory;
mod json;

use std::sync::Arc;

pub use in_memory::InMemoryCookieHost;
pub use json::JsonCookieHost;

/// The host side of `document.cookie`.
///
/// Implementations must be `Send + Sync` and internally synchronized, since
/// callers hold only `&self`.
pub trait CookieHost: Send + Sync {
    /// Whether the host permits cookie storage at all.
    fn cookie_enabled(&self) -> bool;

    /// The full serialized store as seen by the current document, in host order.
    fn cookie_string(&self) -> String;

    /// Merges one assignment into the store.
    ///
    /// Hosts add or overwrite the named cookie and evict it when the assignment
    /// carries an expiry in the past.
    fn set_cookie(&self, assignment: &str) -> anyhow::Result<()>;
}

/// A handle to a cookie host trait.
pub type CookieHostHandle = Arc<dyn CookieHost + Send + Sync>;
