//! In-memory cookie jar with browser cookie-string semantics.

use std::borrow::Cow;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Date format of the `expires` attribute, e.g. `Thu, 01 Jan 1970 00:00:00 GMT`.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Last second a four-digit `expires` year can carry, 9999-12-31 23:59:59 UTC.
const LATEST_EXPIRY_TIMESTAMP: i64 = 253_402_300_799;

/// Bytes escaped by [`encode_uri_component`]: everything but ASCII
/// alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// When a preference stops being returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Number of days from the time of writing. Zero means a session cookie.
    Days(i64),
    /// Absolute point in time.
    At(DateTime<Utc>),
}

impl Expiry {
    /// Absolute expiry for a write at `now`, `None` for a session cookie.
    ///
    /// The result is kept between the Unix epoch and the end of year 9999 so
    /// it survives rendering as an `expires` attribute. Day counts beyond that
    /// range saturate instead of overflowing.
    fn resolve(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let at = match self {
            Expiry::Days(0) => return None,
            Expiry::Days(days) => Duration::try_days(days)
                .and_then(|d| now.checked_add_signed(d))
                .unwrap_or(if days > 0 {
                    DateTime::<Utc>::MAX_UTC
                } else {
                    DateTime::<Utc>::MIN_UTC
                }),
            Expiry::At(at) => at,
        };
        Some(at.clamp(earliest_expiry(), latest_expiry()))
    }
}

fn earliest_expiry() -> DateTime<Utc> {
    DateTime::from_timestamp(0, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn latest_expiry() -> DateTime<Utc> {
    DateTime::from_timestamp(LATEST_EXPIRY_TIMESTAMP, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Attributes written alongside a preference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub expires: Option<Expiry>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
}

impl CookieOptions {
    pub fn expires_in_days(mut self, days: i64) -> Self {
        self.expires = Some(Expiry::Days(days));
        self
    }

    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires = Some(Expiry::At(at));
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }
}

/// One stored cookie. `value` is kept percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub secure: bool,
}

impl Cookie {
    /// Returns true if the cookie has an expiry at or before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }

    fn same_slot(&self, other: &Cookie) -> bool {
        self.name == other.name && self.path == other.path && self.domain == other.domain
    }
}

/// A set of cookies read and written through a cookie string.
///
/// Writes go through [`assign`](Self::assign), which takes the same
/// `name=value; expires=...; path=...` text a page assigns to its cookie
/// property. Reads see [`cookie_string`](Self::cookie_string), the unexpired
/// `name=value` pairs joined by `; `.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieJar {
    #[serde(default)]
    cookies: Vec<Cookie>,
}

impl CookieJar {
    /// Creates an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a jar from a `name=value; name2=value2` string. Entries become session cookies.
    pub fn from_cookie_string(cookies: &str) -> Self {
        let mut jar = Self::new();
        let now = Utc::now();
        for entry in cookies.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            jar.assign_at(entry, now);
        }
        jar
    }

    /// All stored cookies, including expired ones not yet purged.
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// The cookie string as of now.
    pub fn cookie_string(&self) -> String {
        self.cookie_string_at(Utc::now())
    }

    /// The unexpired cookies at `now`, rendered as `name=value` pairs joined by `; `.
    pub fn cookie_string_at(&self, now: DateTime<Utc>) -> String {
        self.cookies
            .iter()
            .filter(|c| !c.is_expired(now))
            .map(|c| {
                if c.name.is_empty() {
                    c.value.clone()
                } else {
                    format!("{}={}", c.name, c.value)
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Applies a cookie assignment as of now.
    pub fn assign(&mut self, set_cookie: &str) {
        self.assign_at(set_cookie, Utc::now());
    }

    /// Applies a cookie assignment such as `name=value; expires=<date>; path=/`.
    ///
    /// A cookie with the same name, path and domain is replaced in place. An
    /// assignment that is already expired at `now` removes it instead.
    pub fn assign_at(&mut self, set_cookie: &str, now: DateTime<Utc>) {
        let mut parts = set_cookie.split(';');
        let pair = parts.next().unwrap_or_default().trim();
        let (name, value) = pair
            .split_once('=')
            .map_or(("", pair), |(n, v)| (n.trim(), v.trim()));

        let mut cookie = Cookie {
            name: name.to_string(),
            value: value.to_string(),
            expires: None,
            path: None,
            domain: None,
            secure: false,
        };

        for attribute in parts.map(str::trim).filter(|a| !a.is_empty()) {
            let (key, value) = attribute
                .split_once('=')
                .map_or((attribute, None), |(k, v)| (k.trim(), Some(v.trim())));

            match key.to_ascii_lowercase().as_str() {
                "expires" => cookie.expires = value.and_then(parse_http_date),
                "path" => cookie.path = value.filter(|v| !v.is_empty()).map(String::from),
                "domain" => cookie.domain = value.filter(|v| !v.is_empty()).map(String::from),
                "secure" => cookie.secure = true,
                _ => {}
            }
        }

        let expired = cookie.is_expired(now);
        match self.cookies.iter().position(|c| c.same_slot(&cookie)) {
            Some(index) if expired => {
                self.cookies.remove(index);
            }
            Some(index) => self.cookies[index] = cookie,
            None if !expired => self.cookies.push(cookie),
            None => {}
        }
    }

    /// Drops cookies expired at `now`. Returns how many were removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.cookies.len();
        self.cookies.retain(|c| !c.is_expired(now));
        before - self.cookies.len()
    }

    /// Returns the decoded value of the first cookie named `name`.
    pub fn get(&self, name: &str) -> Option<String> {
        self.get_at(name, Utc::now())
    }

    /// Reads `name` from the cookie string at `now`.
    ///
    /// Entries are split on `;`, trimmed and matched by the exact prefix
    /// `name=`. The first match wins. A value with malformed escapes is
    /// returned undecoded.
    pub fn get_at(&self, name: &str, now: DateTime<Utc>) -> Option<String> {
        let cookies = self.cookie_string_at(now);
        if cookies.is_empty() {
            return None;
        }

        let prefix = format!("{name}=");
        cookies
            .split(';')
            .map(str::trim)
            .find_map(|entry| entry.strip_prefix(prefix.as_str()))
            .map(|raw| decode_uri_component(raw).unwrap_or_else(|| raw.to_string()))
    }

    /// Writes `name` as of now. `None` deletes it.
    pub fn set(&mut self, name: &str, value: Option<&str>, options: &CookieOptions) {
        self.set_at(name, value, options, Utc::now());
    }

    /// Writes `name=value` with the given attributes.
    ///
    /// `None` writes an empty value that expired a day before `now`, which
    /// removes the cookie.
    pub fn set_at(
        &mut self,
        name: &str,
        value: Option<&str>,
        options: &CookieOptions,
        now: DateTime<Utc>,
    ) {
        let assignment = format_set_cookie(name, value, options, now);
        self.assign_at(&assignment, now);
    }
}

/// Renders the assignment text for a preference write.
pub(crate) fn format_set_cookie(
    name: &str,
    value: Option<&str>,
    options: &CookieOptions,
    now: DateTime<Utc>,
) -> String {
    let (value, expires) = match value {
        Some(value) => (value, options.expires.and_then(|e| e.resolve(now))),
        None => ("", Expiry::Days(-1).resolve(now)),
    };

    let mut out = format!("{name}={}", encode_uri_component(value));
    if let Some(at) = expires {
        out.push_str("; expires=");
        out.push_str(&format_http_date(at));
    }
    if let Some(path) = options.path.as_deref().filter(|p| !p.is_empty()) {
        out.push_str("; path=");
        out.push_str(path);
    }
    if let Some(domain) = options.domain.as_deref().filter(|d| !d.is_empty()) {
        out.push_str("; domain=");
        out.push_str(domain);
    }
    if options.secure {
        out.push_str("; secure");
    }
    out
}

fn format_http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}

fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, HTTP_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc2822(value).map(|d| d.with_timezone(&Utc)))
        .ok()
}

/// Percent-encodes everything except ASCII alphanumerics and `-_.!~*'()`.
///
/// Non-ASCII characters are encoded as their UTF-8 bytes.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Decodes `%XX` escapes. Returns `None` for truncated or non-hex escapes and invalid UTF-8.
pub fn decode_uri_component(value: &str) -> Option<String> {
    // percent_decode passes malformed escapes through untouched
    let bytes = value.as_bytes();
    let well_formed = bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'%')
        .all(|(i, _)| {
            bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
        });
    if !well_formed {
        return None;
    }

    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}
