use obs_core::config::{Config, SessionConfig};
use obs_core::SessionStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Per-process, read-only state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SessionStore,
    pub session: Arc<SessionConfig>,
    pub static_dir: PathBuf,
    pub cors_permissive: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            store: SessionStore::new(&config.session),
            session: Arc::new(config.session.clone()),
            static_dir: PathBuf::from(&config.server.static_dir),
            cors_permissive: config.server.cors_permissive,
        }
    }
}
