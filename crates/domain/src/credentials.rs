use std::fmt::{Debug, Formatter};

use rolescope_core::{AppResult, NonEmptyString};

/// Service principal credentials used for the client-credential grant.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    tenant_id: NonEmptyString,
    client_id: NonEmptyString,
    client_secret: NonEmptyString,
}

impl Credentials {
    /// Creates validated credentials. Blank values are rejected.
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            tenant_id: NonEmptyString::new(tenant_id)?,
            client_id: NonEmptyString::new(client_id)?,
            client_secret: NonEmptyString::new(client_secret)?,
        })
    }

    /// Returns the directory tenant identifier.
    #[must_use]
    pub fn tenant_id(&self) -> &str {
        self.tenant_id.as_str()
    }

    /// Returns the application (client) identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        self.client_id.as_str()
    }

    /// Returns the client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        self.client_secret.as_str()
    }
}

impl Debug for Credentials {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id.as_str())
            .field("client_id", &self.client_id.as_str())
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer token issued by the identity provider.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw bearer token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw bearer token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for AccessToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("AccessToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessToken, Credentials};

    #[test]
    fn credentials_reject_blank_secret() {
        assert!(Credentials::new("tenant", "client", " ").is_err());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let credentials =
            Credentials::new("tenant", "client", "hunter2").unwrap_or_else(|_| unreachable!());
        let rendered = format!("{credentials:?} {:?}", AccessToken::new("eyJ0eXAi"));

        assert!(rendered.contains("tenant"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("eyJ0eXAi"));
    }
}
