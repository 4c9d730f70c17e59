//! Session load and update over a cookie transport

use tracing::debug;

use super::codec::{decode, encode};
use super::model::{Session, SessionPatch, UpdateMode};
use super::transport::CookieTransport;
use crate::config::SessionConfig;
use crate::{Error, Result};

/// Name of the session cookie unless configured otherwise
pub const DEFAULT_COOKIE_NAME: &str = "obs-session";

/// Loads and rewrites the cookie-held session
#[derive(Debug, Clone)]
pub struct SessionStore {
    cookie_name: String,
    update_mode: UpdateMode,
}

impl SessionStore {
    /// Create a store from the session configuration
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            update_mode: config.update_mode,
        }
    }

    /// Name of the cookie the session lives in
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Read the session, initializing it when the client has none.
    ///
    /// A missing cookie yields the default session, which is written back
    /// immediately. A present but undecodable cookie is an error and nothing
    /// is written.
    pub fn load<T>(&self, transport: &mut T) -> Result<Session>
    where
        T: CookieTransport + ?Sized,
    {
        match transport.get(&self.cookie_name) {
            Some(value) => decode(&value),
            None => {
                let session = Session::default();
                transport.set(&self.cookie_name, encode(&session)?);
                debug!(cookie = %self.cookie_name, "Initialized new session");
                Ok(session)
            }
        }
    }

    /// Merge `patch` into the existing session and rewrite the cookie.
    pub fn update<T>(&self, transport: &mut T, patch: SessionPatch) -> Result<Session>
    where
        T: CookieTransport + ?Sized,
    {
        let value = transport.get(&self.cookie_name).ok_or(Error::NoSession)?;
        let mut session = decode(&value)?;
        session.apply(patch, self.update_mode);
        transport.set(&self.cookie_name, encode(&session)?);
        Ok(session)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}
