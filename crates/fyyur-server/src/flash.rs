//! One-shot user notifications.
//!
//! Messages added while handling a request that renders a page are shown on
//! that page. Messages added before a redirect or an empty response travel
//! in a cookie and are shown (and cleared) by the next rendered page.

use axum::{
    extract::FromRequestParts,
    http::{
        header::{COOKIE, LOCATION, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use std::convert::Infallible;

pub const FLASH_COOKIE: &str = "fyyur_flash";

#[derive(Debug, Clone, Default)]
pub struct Flash {
    messages: Vec<String>,
    /// The request carried a flash cookie that must be cleared once shown
    from_cookie: bool,
}

impl Flash {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let raw = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == FLASH_COOKIE)
            .map(|(_, value)| value);

        match raw {
            Some(value) => Self {
                messages: decode(value),
                from_cookie: true,
            },
            None => Self::default(),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn came_from_cookie(&self) -> bool {
        self.from_cookie
    }

    /// `Set-Cookie` value carrying the pending messages to the next page.
    pub fn carry_cookie(&self) -> HeaderValue {
        if self.messages.is_empty() {
            return clear_cookie();
        }
        let value = format!(
            "{FLASH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            encode(&self.messages)
        );
        HeaderValue::from_str(&value).unwrap_or_else(|_| clear_cookie())
    }

    /// `303 See Other` to `location`, carrying pending messages.
    pub fn redirect(self, location: &str) -> Response {
        let mut resp = StatusCode::SEE_OTHER.into_response();
        if let Ok(loc) = HeaderValue::from_str(location) {
            resp.headers_mut().insert(LOCATION, loc);
        }
        resp.headers_mut().insert(SET_COOKIE, self.carry_cookie());
        resp
    }

    /// `204 No Content`, carrying pending messages.
    pub fn no_content(self) -> Response {
        (StatusCode::NO_CONTENT, [(SET_COOKIE, self.carry_cookie())]).into_response()
    }
}

/// Expires the flash cookie.
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("fyyur_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Browsers drop cookies larger than about 4 KB.
const MAX_ENCODED_LEN: usize = 3072;

/// Percent-encode the messages, truncating with an ellipsis to fit a cookie.
fn encode(messages: &[String]) -> String {
    let text = messages.join("\n");
    let encoded = urlencoding::encode(&text);
    if encoded.len() <= MAX_ENCODED_LEN {
        return encoded.into_owned();
    }

    let ellipsis = urlencoding::encode("…");
    let mut out = String::with_capacity(MAX_ENCODED_LEN);
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let piece = urlencoding::encode(c.encode_utf8(&mut buf));
        if out.len() + piece.len() + ellipsis.len() > MAX_ENCODED_LEN {
            break;
        }
        out.push_str(&piece);
    }
    out.push_str(&ellipsis);
    out
}

fn decode(value: &str) -> Vec<String> {
    match urlencoding::decode(value) {
        Ok(text) => text
            .split('\n')
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => Vec::new(),
    }
}

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
