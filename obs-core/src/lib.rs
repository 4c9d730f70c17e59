//! Core types for the obs backend
//!
//! This crate holds the cookie-held session model and its codec, the
//! cookie transport capability, configuration and logging setup shared
//! by the server and the CLI.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;

pub use error::{Error, Result};
pub use session::{CookieTransport, Session, SessionPatch, SessionStore, UpdateMode};
