use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use rolescope_application::DEFAULT_CACHE_TTL_SECONDS;
use rolescope_core::{AppError, AppResult};
use rolescope_domain::Credentials;
use rolescope_infrastructure::{
    DEFAULT_AUTHORITY_HOST, DEFAULT_GRAPH_BASE_URL, DEFAULT_GRAPH_SCOPE,
};
use tracing_subscriber::EnvFilter;

/// Process-wide configuration, loaded once before any network call.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub credentials: Credentials,
    pub authority_host: String,
    pub graph_base_url: String,
    pub graph_scope: String,
    pub cache_ttl_seconds: u32,
    pub http_timeout: Option<Duration>,
    pub host: String,
    pub port: u16,
    pub cookie_secure: bool,
}

impl DashboardConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let required = |name: &str| -> AppResult<String> {
            let value = lookup(name)
                .ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{name} must not be empty")));
            }
            Ok(value)
        };
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let credentials = Credentials::new(
            required("AZURE_TENANT_ID")?,
            required("AZURE_CLIENT_ID")?,
            required("AZURE_CLIENT_SECRET")?,
        )?;

        let cache_ttl_seconds = optional("GRAPH_CACHE_TTL_SECONDS")
            .map(|value| {
                value.parse::<u32>().map_err(|error| {
                    AppError::Validation(format!("invalid GRAPH_CACHE_TTL_SECONDS: {error}"))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_CACHE_TTL_SECONDS);

        let http_timeout = optional("GRAPH_HTTP_TIMEOUT_SECONDS")
            .map(|value| {
                value.parse::<u64>().map(Duration::from_secs).map_err(|error| {
                    AppError::Validation(format!("invalid GRAPH_HTTP_TIMEOUT_SECONDS: {error}"))
                })
            })
            .transpose()?;

        let port = optional("DASHBOARD_PORT")
            .map(|value| {
                value.parse::<u16>().map_err(|error| {
                    AppError::Validation(format!("invalid DASHBOARD_PORT: {error}"))
                })
            })
            .transpose()?
            .unwrap_or(8501);

        Ok(Self {
            credentials,
            authority_host: optional("AZURE_AUTHORITY_HOST")
                .unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_owned()),
            graph_base_url: optional("GRAPH_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_owned()),
            graph_scope: optional("GRAPH_SCOPE").unwrap_or_else(|| DEFAULT_GRAPH_SCOPE.to_owned()),
            cache_ttl_seconds,
            http_timeout,
            host: optional("DASHBOARD_HOST").unwrap_or_else(|| "127.0.0.1".to_owned()),
            port,
            cookie_secure: optional("SESSION_COOKIE_SECURE")
                .is_some_and(|value| value.eq_ignore_ascii_case("true")),
        })
    }

    pub fn socket_address(&self) -> AppResult<SocketAddr> {
        let host = IpAddr::from_str(&self.host).map_err(|error| {
            AppError::Validation(format!("invalid DASHBOARD_HOST '{}': {error}", self.host))
        })?;
        Ok(SocketAddr::from((host, self.port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use rolescope_core::AppError;

    use super::DashboardConfig;

    fn load(pairs: &[(&str, &str)]) -> Result<DashboardConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        DashboardConfig::from_lookup(|name| vars.get(name).cloned())
    }

    const CREDENTIALS: [(&str, &str); 3] = [
        ("AZURE_TENANT_ID", "tenant"),
        ("AZURE_CLIENT_ID", "client"),
        ("AZURE_CLIENT_SECRET", "secret"),
    ];

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config = load(&CREDENTIALS);
        assert!(config.is_ok());
        let Ok(config) = config else { unreachable!() };

        assert_eq!(config.credentials.tenant_id(), "tenant");
        assert_eq!(config.graph_base_url, "https://graph.microsoft.com/v1.0");
        assert_eq!(config.cache_ttl_seconds, 600);
        assert_eq!(config.http_timeout, None);
        assert_eq!(config.port, 8501);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn each_missing_credential_is_fatal() {
        for missing in ["AZURE_TENANT_ID", "AZURE_CLIENT_ID", "AZURE_CLIENT_SECRET"] {
            let pairs: Vec<(&str, &str)> = CREDENTIALS
                .iter()
                .copied()
                .filter(|(name, _)| *name != missing)
                .collect();
            let result = load(&pairs);
            assert!(matches!(
                result,
                Err(AppError::Validation(ref message)) if message.contains(missing)
            ));
        }
    }

    #[test]
    fn blank_credential_is_fatal() {
        let result = load(&[
            ("AZURE_TENANT_ID", "tenant"),
            ("AZURE_CLIENT_ID", "  "),
            ("AZURE_CLIENT_SECRET", "secret"),
        ]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn optional_values_are_parsed() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.extend([
            ("GRAPH_CACHE_TTL_SECONDS", "0"),
            ("GRAPH_HTTP_TIMEOUT_SECONDS", "15"),
            ("DASHBOARD_PORT", "9000"),
            ("SESSION_COOKIE_SECURE", "TRUE"),
        ]);

        let config = load(&pairs);
        assert!(config.is_ok());
        let Ok(config) = config else { unreachable!() };
        assert_eq!(config.cache_ttl_seconds, 0);
        assert_eq!(config.http_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.port, 9000);
        assert!(config.cookie_secure);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("GRAPH_CACHE_TTL_SECONDS", "ten minutes"));
        assert!(matches!(load(&pairs), Err(AppError::Validation(_))));
    }
}
