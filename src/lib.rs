pub mod config;
pub mod cookies;
pub mod errors;

pub use cookies::{CookieHost, CookieHostHandle, CookieStore};
