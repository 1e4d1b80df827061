//! Access token acquisition.

use async_trait::async_trait;
use serde::Deserialize;
use std::io::ErrorKind;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

use datahub_core::defaults;

use crate::error::AuthError;

/// Source of bearer tokens for the search endpoint.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, AuthError>;
}

/// Token supplied up front, e.g. from `DATAHUB_TOKEN`.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }
}

/// Obtains a token from a logged-in Azure CLI session.
#[derive(Debug, Clone)]
pub struct AzureCliTokenProvider {
    program: String,
    resource: String,
    timeout_secs: u64,
}

impl Default for AzureCliTokenProvider {
    fn default() -> Self {
        Self {
            program: defaults::AZ_CLI.to_string(),
            resource: defaults::TOKEN_RESOURCE.to_string(),
            timeout_secs: defaults::TOKEN_TIMEOUT_SECS,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessTokenOutput {
    access_token: Option<String>,
}

impl AzureCliTokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a different executable (a wrapper script or absolute path).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Pull `accessToken` out of `az account get-access-token` output.
fn parse_token_output(stdout: &str) -> Result<String, AuthError> {
    let parsed: AccessTokenOutput =
        serde_json::from_str(stdout).map_err(|e| AuthError::MalformedOutput(e.to_string()))?;
    parsed
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::MalformedOutput("missing accessToken".to_string()))
}

#[async_trait]
impl TokenProvider for AzureCliTokenProvider {
    async fn access_token(&self) -> Result<String, AuthError> {
        debug!(
            subsystem = "search",
            component = "auth",
            op = "access_token",
            program = %self.program,
            "Requesting access token"
        );

        let mut cmd = Command::new(&self.program);
        cmd.args(["account", "get-access-token", "--resource", self.resource.as_str()])
            .kill_on_drop(true);

        let output = tokio::time::timeout(Duration::from_secs(self.timeout_secs), cmd.output())
            .await
            .map_err(|_| AuthError::Timeout {
                secs: self.timeout_secs,
            })?
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AuthError::CliNotFound,
                _ => AuthError::Io(e.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AuthError::NotLoggedIn { stderr });
        }

        let token = parse_token_output(&String::from_utf8_lossy(&output.stdout))?;
        info!(subsystem = "search", component = "auth", "Access token acquired");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_output() {
        let out = r#"{"accessToken": "eyJ0", "expiresOn": "2026-01-01 10:00:00", "tokenType": "Bearer"}"#;
        assert_eq!(parse_token_output(out).unwrap(), "eyJ0");
    }

    #[test]
    fn test_parse_token_output_missing_field() {
        assert!(matches!(
            parse_token_output(r#"{"tokenType": "Bearer"}"#),
            Err(AuthError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_token_output(r#"{"accessToken": ""}"#),
            Err(AuthError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_token_output("Please run 'az login'"),
            Err(AuthError::MalformedOutput(_))
        ));
    }

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticTokenProvider::new("abc");
        assert_eq!(provider.access_token().await.unwrap(), "abc");
        assert!(!format!("{:?}", provider).contains("abc"));
    }

    #[tokio::test]
    async fn test_missing_cli_is_reported() {
        let provider =
            AzureCliTokenProvider::new().with_program("datahub-search-no-such-binary-xyz");
        assert_eq!(
            provider.access_token().await.unwrap_err(),
            AuthError::CliNotFound
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_cli_means_not_logged_in() {
        let provider = AzureCliTokenProvider::new().with_program("false");
        assert!(matches!(
            provider.access_token().await.unwrap_err(),
            AuthError::NotLoggedIn { .. }
        ));
    }

    #[cfg(unix)]
    #[tokio::test(start_paused = true)]
    async fn test_slow_cli_times_out() {
        // The paused clock reaches the deadline as soon as the runtime idles.
        let provider = AzureCliTokenProvider::new()
            .with_program("false")
            .with_timeout(5);
        assert_eq!(
            provider.access_token().await.unwrap_err(),
            AuthError::Timeout { secs: 5 }
        );
    }

    #[test]
    fn test_defaults() {
        let provider = AzureCliTokenProvider::default();
        assert_eq!(provider.program, "az");
        assert_eq!(provider.resource, "https://analysis.windows.net/powerbi/api");
        assert_eq!(provider.timeout_secs, 30);
    }
}
