//! Two-step resolution: try the primary source, otherwise use a named default.

use serde_json::Value;

use crate::client::ClientError;

/// Tag shown when a repository has no language data or the gateway refused.
pub const SOURCE_CODE_TAG: &str = "Source Code";

/// Tag shown when the gateway could not be reached or sent garbage.
pub const OFFLINE_TAG: &str = "Offline";

pub const MAX_LANGUAGE_TAGS: usize = 4;

/// A value and whether it came from the primary source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<T> {
    Primary(T),
    Fallback(T),
}

impl<T> Resolved<T> {
    pub fn into_inner(self) -> T {
        match self {
            Resolved::Primary(v) | Resolved::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }
}

pub fn identicon_url(username: &str) -> String {
    format!("https://github.com/identicons/{username}.png")
}

/// Pick the avatar from a `users/<name>` lookup.
pub fn resolve_avatar(username: &str, outcome: Result<Value, ClientError>) -> Resolved<String> {
    match outcome {
        Ok(profile) => match profile.get("avatar_url").and_then(Value::as_str) {
            Some(url) if !url.is_empty() => Resolved::Primary(url.to_string()),
            _ => Resolved::Fallback(identicon_url(username)),
        },
        Err(e) => {
            tracing::warn!(username, error = %e, "Profile lookup failed, using identicon");
            Resolved::Fallback(identicon_url(username))
        }
    }
}

/// Pick language tags from a `repos/<owner>/<repo>/languages` lookup.
///
/// Keys keep the upstream order, which ranks languages by size. A `null`
/// payload has no keys to read and is treated like an unreachable gateway.
pub fn resolve_languages(outcome: Result<Value, ClientError>) -> Resolved<Vec<String>> {
    match outcome {
        Ok(Value::Object(languages)) if !languages.is_empty() => Resolved::Primary(
            languages
                .keys()
                .take(MAX_LANGUAGE_TAGS)
                .cloned()
                .collect(),
        ),
        Ok(Value::Null) => {
            tracing::warn!("Language lookup returned null");
            Resolved::Fallback(vec![OFFLINE_TAG.to_string()])
        }
        Ok(_) | Err(ClientError::Status { .. }) => {
            Resolved::Fallback(vec![SOURCE_CODE_TAG.to_string()])
        }
        Err(e @ ClientError::Request(_)) => {
            tracing::warn!(error = %e, "Language lookup failed");
            Resolved::Fallback(vec![OFFLINE_TAG.to_string()])
        }
    }
}
