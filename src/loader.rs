//! Line-delimited input files: credentials and proxy endpoints.
//!
//! Entries are trimmed and blank lines dropped. No format validation happens
//! here; malformed entries surface later as request failures.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::proxy::ProxyEndpoint;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No accounts found in {0}")]
    NoAccounts(PathBuf),
}

/// Bearer token identifying one account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never more than two characters, whatever the token length.
        let head: String = self.0.chars().take(2).collect();
        write!(f, "Credential({}....)", head)
    }
}

/// Read a file as a list of non-empty trimmed lines.
pub async fn read_lines(path: &Path) -> Result<Vec<String>, LoadError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_lines(&contents))
}

fn parse_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load the credential list. An unreadable or empty file is fatal.
pub async fn load_credentials(path: &Path) -> Result<Vec<Credential>, LoadError> {
    let lines = read_lines(path).await?;
    if lines.is_empty() {
        return Err(LoadError::NoAccounts(path.to_path_buf()));
    }
    tracing::info!("Loaded {} credentials from {}", lines.len(), path.display());
    Ok(lines.into_iter().map(Credential::new).collect())
}

/// Load the proxy list. Failures degrade to an empty list with a warning.
pub async fn load_proxies(path: &Path) -> Vec<ProxyEndpoint> {
    match read_lines(path).await {
        Ok(lines) => {
            if lines.is_empty() {
                tracing::warn!("{} is empty, continuing without proxies", path.display());
            } else {
                tracing::info!("Loaded {} proxies from {}", lines.len(), path.display());
            }
            lines.into_iter().map(ProxyEndpoint::new).collect()
        }
        Err(e) => {
            tracing::warn!("{}, continuing without proxies", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn parse_lines_trims_and_skips_blank_lines() {
        let lines = parse_lines("  alpha \n\n\r\nbeta\r\n   \ngamma");
        assert_eq!(lines, vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn credentials_keep_file_order() {
        let file = file_with("tok-a\n\ntok-b\n");
        let creds = load_credentials(file.path()).await.unwrap();
        assert_eq!(creds, vec![Credential::new("tok-a"), Credential::new("tok-b")]);
    }

    #[tokio::test]
    async fn empty_credential_file_is_fatal() {
        let file = file_with("\n   \n");
        let err = load_credentials(file.path()).await.unwrap_err();
        assert!(matches!(err, LoadError::NoAccounts(_)));
    }

    #[tokio::test]
    async fn missing_credential_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_credentials(&dir.path().join("token.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn missing_proxy_file_degrades_to_direct() {
        let dir = tempfile::tempdir().unwrap();
        let proxies = load_proxies(&dir.path().join("proxy.txt")).await;
        assert!(proxies.is_empty());
    }

    #[tokio::test]
    async fn proxies_are_not_validated_at_load() {
        let file = file_with("socks5://1.2.3.4:1080\nnot a uri\n");
        let proxies = load_proxies(file.path()).await;
        assert_eq!(proxies.len(), 2);
        assert_eq!(proxies[1].as_str(), "not a uri");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let cred = Credential::new("eyJhbGciOiJIUzI1NiJ9.secret.payload");
        let shown = format!("{:?}", cred);
        assert!(!shown.contains("secret"));
        assert_eq!(shown, "Credential(ey....)");
    }

    #[test]
    fn short_credential_debug_is_redacted() {
        let shown = format!("{:?}", Credential::new("abc123"));
        assert!(!shown.contains("abc123"));
        assert_eq!(shown, "Credential(ab....)");
    }
}
