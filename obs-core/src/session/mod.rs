//! Cookie-held session state
//!
//! The session lives entirely in the client's `obs-session` cookie as
//! base64 (URL-safe, padded) JSON. Every request rebuilds it from the cookie
//! it carries; the server keeps no copy between requests.

pub mod codec;
pub mod model;
pub mod store;
pub mod transport;

pub use codec::{decode, encode};
pub use model::{Session, SessionPatch, UpdateMode};
pub use store::{SessionStore, DEFAULT_COOKIE_NAME};
pub use transport::{CookieTransport, MemoryTransport};
