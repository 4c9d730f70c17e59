//! Cookie transport capability

use std::collections::HashMap;

/// Reads the request's named cookies and writes response cookies.
///
/// The session store only ever sees this trait, so it can run against an
/// HTTP request/response pair or against [`MemoryTransport`].
pub trait CookieTransport {
    /// Value of the named cookie on the incoming request
    fn get(&self, name: &str) -> Option<String>;

    /// Set a cookie on the outgoing response
    fn set(&mut self, name: &str, value: String);
}

/// In-memory transport for exercising the store without an HTTP stack
///
/// Used by this crate's unit and property tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    incoming: HashMap<String, String>,
    outgoing: Vec<(String, String)>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cookie to the simulated request
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.incoming.insert(name.into(), value.into());
        self
    }

    /// Cookies written so far, in order
    pub fn written(&self) -> &[(String, String)] {
        &self.outgoing
    }

    /// Last value written for the named cookie
    pub fn written_value(&self, name: &str) -> Option<&str> {
        self.outgoing
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Build the transport for the client's next request, with written cookies applied
    pub fn next_request(&self) -> Self {
        let mut incoming = self.incoming.clone();
        for (name, value) in &self.outgoing {
            incoming.insert(name.clone(), value.clone());
        }
        Self {
            incoming,
            outgoing: Vec::new(),
        }
    }
}

impl CookieTransport for MemoryTransport {
    fn get(&self, name: &str) -> Option<String> {
        self.incoming.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: String) {
        self.outgoing.push((name.to_string(), value));
    }
}
