//! Security utilities for Trello API operations.
//!
//! Trello authenticates with `key` and `token` query parameters, so any
//! URL echoed back by the HTTP layer (for example in a connection error
//! message) carries live credentials. Messages MUST pass through
//! [`redact::credentials`] before they are stored in an error or logged,
//! and URLs kept inside errors MUST pass through [`redact::url`].
//!
//! ```rust
//! use trello_client::security::redact;
//!
//! let message = "error sending request for url (https://api.trello.com/1/batch?key=abc&token=xyz)";
//! let safe = redact::credentials(message);
//! assert!(!safe.contains("xyz"));
//! ```

/// Credential redaction for free-form messages.
pub mod redact {
    use std::sync::LazyLock;

    use regex_lite::Regex;

    static CREDENTIAL_PARAM: LazyLock<Option<Regex>> =
        LazyLock::new(|| Regex::new(r"(?i)\b(key|token|secret)=[^&\s)]+").ok());

    /// Replace the values of `key`, `token` and `secret` parameters.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trello_client::security::redact;
    ///
    /// assert_eq!(
    ///     redact::credentials("GET /1/members/me?key=abc&token=def"),
    ///     "GET /1/members/me?key=[REDACTED]&token=[REDACTED]"
    /// );
    /// ```
    #[must_use]
    pub fn credentials(message: &str) -> String {
        match CREDENTIAL_PARAM.as_ref() {
            Some(pattern) => pattern.replace_all(message, "$1=[REDACTED]").to_string(),
            None => message.to_string(),
        }
    }

    /// Replace the values of `key`, `token` and `secret` query parameters
    /// in place. Other parameters keep their values and order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trello_client::security::redact;
    ///
    /// let mut url = url::Url::parse("https://api.trello.com/1/batch?urls=%2Fcards%2Fa&token=def").unwrap();
    /// redact::url(&mut url);
    /// assert_eq!(url.query(), Some("urls=%2Fcards%2Fa&token=REDACTED"));
    /// ```
    pub fn url(target: &mut url::Url) {
        let Some(query) = target.query() else {
            return;
        };

        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .map(|(name, value)| {
                let value = if is_credential(&name) {
                    "REDACTED".to_string()
                } else {
                    value.into_owned()
                };
                (name.into_owned(), value)
            })
            .collect();

        target.query_pairs_mut().clear().extend_pairs(pairs);
    }

    fn is_credential(name: &str) -> bool {
        ["key", "token", "secret"]
            .iter()
            .any(|credential| name.eq_ignore_ascii_case(credential))
    }
}
