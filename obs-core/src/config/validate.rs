//! Configuration validation rules.

use super::schema::Config;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push("server.host must not be empty".to_string());
    }
    if config.server.static_dir.trim().is_empty() {
        errors.push("server.static_dir must not be empty".to_string());
    }

    if !is_cookie_token(&config.session.cookie_name) {
        errors.push(format!(
            "session.cookie_name '{}' is not a valid cookie name",
            config.session.cookie_name
        ));
    }
    if !config.session.cookie_path.starts_with('/') {
        errors.push("session.cookie_path must start with '/'".to_string());
    }
    if matches!(config.session.max_age_secs, Some(secs) if secs <= 0) {
        errors.push("session.max_age_secs must be > 0 when set".to_string());
    }

    let format = config.logging.format.to_ascii_lowercase();
    if format != "text" && format != "json" {
        errors.push(format!(
            "logging.format must be 'text' or 'json', got '{}'",
            config.logging.format
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}

/// RFC 6265 cookie-name token
fn is_cookie_token(name: &str) -> bool {
    const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={} \t";
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_graphic() && !SEPARATORS.contains(&b))
}
