//! Browser session cookies and the small validation rules around them.
//!
//! The backend owns the session: this client only reads `sessionid` and
//! `django_language` from the incoming `Cookie` header and forwards them on
//! every backend call.

/// Cookie carrying the backend session key.
pub const SESSION_COOKIE: &str = "sessionid";

/// Cookie carrying the preferred UI language.
pub const LANGUAGE_COOKIE: &str = "django_language";

/// The cookies forwarded to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    pub session_id: Option<String>,
    pub language: Option<String>,
}

impl SessionCookies {
    /// Parse a `Cookie` request header.
    ///
    /// Pairs are separated by `;`. The first occurrence of a name wins and
    /// pairs without `=` are ignored.
    pub fn from_cookie_header(header: &str) -> Self {
        let mut cookies = Self::default();

        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            match name.trim() {
                SESSION_COOKIE if cookies.session_id.is_none() => {
                    cookies.session_id = Some(value.to_string());
                }
                LANGUAGE_COOKIE if cookies.language.is_none() => {
                    cookies.language = Some(value.to_string());
                }
                _ => {}
            }
        }

        cookies
    }

    /// Parse every `Cookie` header of a request, in order.
    pub fn from_cookie_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let joined = headers.into_iter().collect::<Vec<_>>().join(";");
        Self::from_cookie_header(&joined)
    }

    /// Render the outbound `Cookie` header, or `None` if there is nothing to forward.
    pub fn cookie_header(&self) -> Option<String> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(ref session_id) = self.session_id {
            pairs.push(format!("{SESSION_COOKIE}={session_id}"));
        }
        if let Some(ref language) = self.language {
            pairs.push(format!("{LANGUAGE_COOKIE}={language}"));
        }

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    /// Language prefix for localized backend URLs.
    ///
    /// Uses the cookie when it holds a valid tag, else `default`.
    pub fn language_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.language.as_deref() {
            Some(lang) if is_valid_language_tag(lang) => lang,
            _ => default,
        }
    }
}

/// Whether `tag` is acceptable as a language code (`en`, `sv`, `zh-hans`).
///
/// 1..=35 characters of ASCII letters, digits and `-`, starting with a letter.
/// Anything else could break the cookie header or the URL it is spliced into.
pub fn is_valid_language_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag.len() <= 35
        && tag.starts_with(|c: char| c.is_ascii_alphabetic())
        && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Return `target` if it is a same-origin absolute path, else `None`.
///
/// Rejects scheme-relative (`//host`), backslash tricks and control
/// characters so the language switch cannot become an open redirect.
pub fn safe_redirect_target(target: &str) -> Option<&str> {
    let valid = target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.chars().any(char::is_control);

    valid.then_some(target)
}
