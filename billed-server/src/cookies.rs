use std::collections::HashMap;
use std::convert::Infallible;

use async_trait::async_trait;
use axum::extract::{FromRequest, RequestParts};
use axum::headers::Cookie;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::TypedHeader;
use billed_core::session::SessionStorage;

const COOKIE_PREFIX: &str = "billed_";

/// [`SessionStorage`] kept in browser cookies, one cookie per key.
///
/// Values are base64url encoded. Changes are sent back with the
/// `Set-Cookie` headers from [`CookieStorage::set_cookie_headers`].
#[derive(Debug, Clone, Default)]
pub struct CookieStorage {
    items: HashMap<String, String>,
    changed: Vec<String>,
}

impl CookieStorage {
    pub fn from_cookie(cookie: Option<&Cookie>) -> Self {
        let mut items = HashMap::new();
        if let Some(cookie) = cookie {
            for (name, value) in cookie.iter() {
                let key = match name.strip_prefix(COOKIE_PREFIX) {
                    Some(key) => key,
                    None => continue,
                };
                match decode(value) {
                    Some(value) => {
                        items.insert(key.to_string(), value);
                    }
                    None => tracing::trace!(cookie = name, "ignoring undecodable cookie"),
                }
            }
        }
        Self {
            items,
            changed: Vec::new(),
        }
    }

    /// `Set-Cookie` headers for every key written or removed.
    pub fn set_cookie_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for key in &self.changed {
            let cookie = match self.items.get(key) {
                Some(value) => format!(
                    "{}{}={}; Path=/; HttpOnly; SameSite=Lax",
                    COOKIE_PREFIX,
                    key,
                    encode(value)
                ),
                None => format!("{}{}=; Path=/; Max-Age=0", COOKIE_PREFIX, key),
            };
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    headers.append(SET_COOKIE, value);
                }
                Err(e) => tracing::error!(key = key.as_str(), "invalid cookie header: {}", e),
            }
        }
        headers
    }

    fn mark_changed(&mut self, key: &str) {
        if !self.changed.iter().any(|k| k == key) {
            self.changed.push(key.to_string());
        }
    }
}

impl SessionStorage for CookieStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
        self.mark_changed(key);
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
        self.mark_changed(key);
    }
}

#[async_trait]
impl<B> FromRequest<B> for CookieStorage
where
    B: Send,
{
    type Rejection = Infallible;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let cookie = Option::<TypedHeader<Cookie>>::from_request(req)
            .await
            .ok()
            .flatten();
        Ok(Self::from_cookie(cookie.as_ref().map(|c| &c.0)))
    }
}

fn encode(value: &str) -> String {
    base64::encode_config(value.as_bytes(), base64::URL_SAFE_NO_PAD)
}

fn decode(value: &str) -> Option<String> {
    let bytes = base64::decode_config(value, base64::URL_SAFE_NO_PAD).ok()?;
    String::from_utf8(bytes).ok()
}
