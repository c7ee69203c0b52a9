//! Sink option-string compiler.
//!
//! A sink is configured with a single semicolon-delimited string, e.g.
//!
//! ```text
//! https://hook.example/notify;auth_user=bot;auth_pass=secret;timeout=3
//! ```
//!
//! The first token without an `=` is the bare endpoint URL; every other
//! token is a `key=value` pair looked up in a fixed table. Unknown keys,
//! later bare tokens and malformed values are ignored without error;
//! misconfiguration surfaces only as delivery failures, never at compile
//! time.
//!
//! Compilation happens exactly once per sink, when its worker starts.

use std::time::Duration;

use tracing::debug;

/// Compiled sink configuration.
///
/// Immutable after [`SinkOptions::parse`]; consumed by the worker when it
/// builds its transport.
///
/// `mail_to`/`mail_from` are compiled and kept for mail-capable
/// transports; an HTTP delivery carries them along without using them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkOptions {
    /// Target endpoint URL.
    pub url: Option<String>,

    /// Recipient list, in configured order.
    pub mail_to: Vec<String>,

    /// Sender address.
    pub mail_from: Option<String>,

    /// Force a secure transport regardless of URL scheme.
    pub force_tls: bool,

    /// Basic-auth username.
    pub auth_user: Option<String>,

    /// Basic-auth password.
    pub auth_pass: Option<String>,

    /// Total operation timeout.
    pub timeout: Option<Duration>,

    /// Connection-establish timeout.
    pub connect_timeout: Option<Duration>,
}

/// Recognized option keys and their value transforms.
///
/// One tagged kind per table row; each carries a pure transform
/// (identity, comma-split, boolean-set, integer-parse) applied in
/// [`OptionKey::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionKey {
    /// `url`: set the target endpoint.
    Url,
    /// `mail_to`: comma-split into the recipient list.
    MailTo,
    /// `mail_from`: set the sender.
    MailFrom,
    /// `ssl`: force a secure transport; the value is ignored.
    Ssl,
    /// `auth_user`: basic-auth username.
    AuthUser,
    /// `auth_pass`: basic-auth password.
    AuthPass,
    /// `timeout`: total timeout in whole seconds.
    Timeout,
    /// `conn_timeout`: connect timeout in whole seconds.
    ConnTimeout,
}

impl OptionKey {
    /// Look a key name up in the fixed table.
    fn lookup(key: &str) -> Option<Self> {
        match key {
            "url" => Some(Self::Url),
            "mail_to" => Some(Self::MailTo),
            "mail_from" => Some(Self::MailFrom),
            "ssl" => Some(Self::Ssl),
            "auth_user" => Some(Self::AuthUser),
            "auth_pass" => Some(Self::AuthPass),
            "timeout" => Some(Self::Timeout),
            "conn_timeout" => Some(Self::ConnTimeout),
            _ => None,
        }
    }

    /// Apply one `key=value` pair. Later occurrences of the same key
    /// overwrite earlier ones.
    fn apply(self, options: &mut SinkOptions, value: &str) {
        match self {
            Self::Url => options.url = Some(value.to_string()),
            Self::MailTo => options.mail_to = split_list(value),
            Self::MailFrom => options.mail_from = Some(value.to_string()),
            Self::Ssl => options.force_tls = true,
            Self::AuthUser => options.auth_user = Some(value.to_string()),
            Self::AuthPass => options.auth_pass = Some(value.to_string()),
            Self::Timeout => {
                if let Some(d) = parse_seconds(value) {
                    options.timeout = Some(d);
                }
            }
            Self::ConnTimeout => {
                if let Some(d) = parse_seconds(value) {
                    options.connect_timeout = Some(d);
                }
            }
        }
    }
}

impl SinkOptions {
    /// Compile a raw option string.
    ///
    /// The first-token state is local to this call, so concurrent sinks
    /// compiling at the same time cannot interfere with each other.
    pub fn parse(raw: &str) -> Self {
        let mut options = Self::default();
        let mut seen_first = false;

        for token in raw.split(';') {
            if token.is_empty() {
                continue;
            }
            match token.split_once('=') {
                None => {
                    // Only the first token may name the endpoint bare;
                    // any later bare token is dropped on the floor.
                    if seen_first {
                        debug!(token, "ignoring bare sink option token");
                    } else {
                        options.url = Some(token.to_string());
                        seen_first = true;
                    }
                }
                Some((key, value)) => {
                    seen_first = true;
                    match OptionKey::lookup(key) {
                        Some(k) => k.apply(&mut options, value),
                        None => debug!(key, "ignoring unknown sink option"),
                    }
                }
            }
        }

        options
    }
}

/// Split a comma-separated value into its non-empty items, in order.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a whole-seconds value. Malformed or zero values yield `None`,
/// leaving the process-wide default in force.
fn parse_seconds(value: &str) -> Option<Duration> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            debug!(value, "ignoring unparseable timeout value");
            None
        }
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
