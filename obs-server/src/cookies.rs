//! Cookie transport over HTTP headers.
//!
//! Cookie values are written verbatim in `Set-Cookie`, so the base64 padding
//! of a session value reaches the client as `=` and not `%3D`.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};
use cookie::{Cookie, CookieJar};
use obs_core::config::SessionConfig;
use obs_core::CookieTransport;

use crate::state::AppState;

/// Request cookies plus the cookies to set on the response
#[derive(Debug, Clone)]
pub struct HeaderCookies {
    jar: CookieJar,
    path: String,
    max_age_secs: Option<i64>,
}

impl HeaderCookies {
    /// Parse every `Cookie` header pair by pair. A pair that is not UTF-8,
    /// does not parse, or carries bytes outside the cookie-octet set is
    /// skipped on its own; on duplicate names the first valid occurrence wins.
    pub fn from_headers(headers: &HeaderMap, config: &SessionConfig) -> Self {
        let mut jar = CookieJar::new();
        let pairs = headers
            .get_all(COOKIE)
            .iter()
            .flat_map(|value| value.as_bytes().split(|b| *b == b';'))
            .filter_map(|pair| std::str::from_utf8(pair).ok())
            .filter(|pair| !pair.trim().is_empty())
            .filter_map(|pair| Cookie::parse(pair.trim().to_owned()).ok())
            .filter(|cookie| is_cookie_value(cookie.value_trimmed()));
        for cookie in pairs {
            if jar.get(cookie.name()).is_none() {
                jar.add_original(cookie.into_owned());
            }
        }

        Self {
            jar,
            path: config.cookie_path.clone(),
            max_age_secs: config.max_age_secs,
        }
    }

    /// Cookies that will be sent back in `Set-Cookie`
    pub fn pending(&self) -> impl Iterator<Item = &Cookie<'static>> {
        self.jar.delta()
    }
}

impl CookieTransport for HeaderCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|c| c.value_trimmed().to_string())
    }

    fn set(&mut self, name: &str, value: String) {
        let mut builder = Cookie::build((name.to_string(), value)).path(self.path.clone());
        if let Some(secs) = self.max_age_secs {
            builder = builder.max_age(cookie::time::Duration::seconds(secs));
        }
        self.jar.add(builder);
    }
}

/// RFC 6265 `cookie-octet`: visible ASCII except `"`, `,`, `;` and `\`
fn is_cookie_value(value: &str) -> bool {
    value
        .bytes()
        .all(|b| matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E))
}

#[async_trait]
impl FromRequestParts<AppState> for HeaderCookies {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers, &state.session))
    }
}

impl IntoResponseParts for HeaderCookies {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for cookie in self.jar.delta() {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    res.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => tracing::warn!("Dropping unrepresentable cookie {}: {}", cookie.name(), e),
            }
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for value in values {
            map.append(COOKIE, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_reads_padded_value() {
        let cookies = HeaderCookies::from_headers(
            &headers(&["theme=dark; obs-session=eyJsYXQiOjAsImxvbiI6MH0="]),
            &SessionConfig::default(),
        );
        assert_eq!(
            cookies.get("obs-session").as_deref(),
            Some("eyJsYXQiOjAsImxvbiI6MH0=")
        );
        assert_eq!(cookies.get("theme").as_deref(), Some("dark"));
        assert!(cookies.get("missing").is_none());
    }

    #[test]
    fn test_non_ascii_neighbour_does_not_hide_session() {
        let mut map = HeaderMap::new();
        map.append(
            COOKIE,
            HeaderValue::from_bytes(b"pref=caf\xc3\xa9; obs-session=eyJsYXQiOjAsImxvbiI6MH0=")
                .unwrap(),
        );
        let cookies = HeaderCookies::from_headers(&map, &SessionConfig::default());

        assert_eq!(
            cookies.get("obs-session").as_deref(),
            Some("eyJsYXQiOjAsImxvbiI6MH0=")
        );
        assert!(cookies.get("pref").is_none());
    }

    #[test]
    fn test_invalid_octets_count_as_absent() {
        let cookies = HeaderCookies::from_headers(
            &headers(&[r"obs-session=ab\cd", "other=a,b"]),
            &SessionConfig::default(),
        );
        assert!(cookies.get("obs-session").is_none());
        assert!(cookies.get("other").is_none());
    }

    #[test]
    fn test_invalid_duplicate_does_not_shadow_valid_one() {
        let cookies = HeaderCookies::from_headers(
            &headers(&[r"obs-session=ab\cd; obs-session=abc="]),
            &SessionConfig::default(),
        );
        assert_eq!(cookies.get("obs-session").as_deref(), Some("abc="));
    }

    #[test]
    fn test_quoted_value_is_unquoted() {
        let cookies = HeaderCookies::from_headers(
            &headers(&[r#"obs-session="eyJsYXQiOjAsImxvbiI6MH0=""#]),
            &SessionConfig::default(),
        );
        assert_eq!(
            cookies.get("obs-session").as_deref(),
            Some("eyJsYXQiOjAsImxvbiI6MH0=")
        );
    }

    #[test]
    fn test_cookie_octets() {
        assert!(is_cookie_value("eyJsYXQiOjAsImxvbiI6MH0="));
        assert!(is_cookie_value("a-b_c"));
        assert!(is_cookie_value(""));
        assert!(!is_cookie_value("a b"));
        assert!(!is_cookie_value(r"a\b"));
        assert!(!is_cookie_value("a\"b"));
        assert!(!is_cookie_value("café"));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let cookies = HeaderCookies::from_headers(
            &headers(&["obs-session=first", "obs-session=second"]),
            &SessionConfig::default(),
        );
        assert_eq!(cookies.get("obs-session").as_deref(), Some("first"));
    }

    #[test]
    fn test_originals_are_not_resent() {
        let cookies = HeaderCookies::from_headers(
            &headers(&["obs-session=abc"]),
            &SessionConfig::default(),
        );
        assert_eq!(cookies.pending().count(), 0);
    }

    #[test]
    fn test_set_cookie_is_verbatim() {
        let mut cookies = HeaderCookies::from_headers(&HeaderMap::new(), &SessionConfig::default());
        cookies.set("obs-session", "eyJsYXQiOjAsImxvbiI6MH0=".to_string());

        let written: Vec<String> = cookies.pending().map(|c| c.to_string()).collect();
        assert_eq!(written, vec!["obs-session=eyJsYXQiOjAsImxvbiI6MH0=; Path=/"]);
    }

    #[test]
    fn test_set_cookie_with_max_age() {
        let config = SessionConfig {
            max_age_secs: Some(3600),
            ..SessionConfig::default()
        };
        let mut cookies = HeaderCookies::from_headers(&HeaderMap::new(), &config);
        cookies.set("obs-session", "abc=".to_string());

        let written = cookies.pending().next().unwrap();
        assert_eq!(written.value(), "abc=");
        assert_eq!(written.max_age(), Some(cookie::time::Duration::seconds(3600)));
    }
}
