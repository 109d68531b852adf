//! Server-held credential for the upstream API.

use std::env;
use std::fmt;

/// Secret token injected into upstream requests. Never logged or serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token. Empty tokens count as absent.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Access the raw token for building the authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Where the gateway obtains its credential for each request.
pub trait CredentialSource: Send + Sync {
    /// Name reported in the configuration error when the credential is absent.
    fn name(&self) -> &str;

    /// Current credential, if configured.
    fn load(&self) -> Option<Credential>;
}

/// Reads the credential from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvCredential {
    fn name(&self) -> &str {
        &self.var
    }

    fn load(&self) -> Option<Credential> {
        env::var(&self.var).ok().and_then(Credential::new)
    }
}

/// A fixed credential, for embedding the gateway or testing it.
#[derive(Debug, Clone)]
pub struct StaticCredential {
    name: String,
    credential: Option<Credential>,
}

impl StaticCredential {
    pub fn new(name: impl Into<String>, token: Option<&str>) -> Self {
        Self {
            name: name.into(),
            credential: token.and_then(Credential::new),
        }
    }
}

impl CredentialSource for StaticCredential {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Option<Credential> {
        self.credential.clone()
    }
}
