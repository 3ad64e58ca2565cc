// src/cookies.rs
//! Cookies: the [`CookieStore`] facade, the [`CookieHost`] seam and host backends.

mod codec;
mod cookie;
mod host;
mod store;

pub use codec::{decode_value, encode_value, format_expires, parse_expires, EPOCH_EXPIRES};

pub use cookie::Cookie;

pub use host::CookieHost;
pub use host::CookieHostHandle;
pub use host::InMemoryCookieHost;
pub use host::JsonCookieHost;

pub use store::CookieStore;
