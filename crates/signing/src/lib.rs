#![deny(clippy::pedantic, unsafe_code)]

//! Signing certificate inspection
//!
//! When the index metadata can't tell whether a release carries the
//! developer's own signature, the artifact itself is downloaded and its
//! certificate inspected. The result only overrides what is displayed.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, warn};
use vercheck_errors::{Error, SigningError, StorageError};
use vercheck_net::NetClient;
use vercheck_types::SigningVerdict;

/// Something that can print the signing certificates of a local artifact
#[async_trait]
pub trait SigningInspector: Send + Sync {
    /// Return the inspection tool's textual output
    ///
    /// # Errors
    ///
    /// Returns a `SigningError` if the tool can't be run or reports failure.
    async fn inspect(&self, artifact: &Path) -> Result<String, Error>;
}

/// `apksigner verify --print-certs`
#[derive(Debug, Clone)]
pub struct ApkSigner {
    tool: PathBuf,
}

impl ApkSigner {
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into() }
    }
}

#[async_trait]
impl SigningInspector for ApkSigner {
    async fn inspect(&self, artifact: &Path) -> Result<String, Error> {
        let tool = self.tool.display().to_string();
        let output = Command::new(&self.tool)
            .args(["verify", "--print-certs"])
            .arg(artifact)
            .output()
            .await
            .map_err(|e| SigningError::SpawnFailed {
                tool: tool.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(SigningError::InspectionFailed {
                tool,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Interpret inspection output
///
/// Independently signed means the repository's own signing identity does
/// not appear among the certificates.
#[must_use]
pub fn verdict(inspection_output: &str, official_signer: &str) -> SigningVerdict {
    if inspection_output.contains(official_signer) {
        SigningVerdict::No
    } else {
        SigningVerdict::Yes
    }
}

/// Downloads an artifact into a scratch directory and inspects it
#[derive(Clone)]
pub struct SignatureProbe {
    net: NetClient,
    inspector: Arc<dyn SigningInspector>,
    official_signer: String,
}

impl SignatureProbe {
    pub fn new(
        net: NetClient,
        inspector: Arc<dyn SigningInspector>,
        official_signer: impl Into<String>,
    ) -> Self {
        Self {
            net,
            inspector,
            official_signer: official_signer.into(),
        }
    }

    /// Fetch `url` as `file_name` and classify its signer
    ///
    /// The scratch directory is removed when this returns, whatever the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the download or the inspection fails.
    pub async fn probe(&self, url: &str, file_name: &str) -> Result<SigningVerdict, Error> {
        let scratch = tempfile::tempdir().map_err(StorageError::from)?;
        let artifact = scratch.path().join(file_name);

        vercheck_net::download_file(&self.net, url, &artifact).await?;
        let output = self.inspector.inspect(&artifact).await?;

        let verdict = verdict(&output, &self.official_signer);
        debug!(url, verdict = verdict.label(), "signing inspected");
        Ok(verdict)
    }

    /// Best-effort [`probe`](Self::probe): failures are logged and yield `None`
    pub async fn try_probe(&self, url: &str, file_name: &str) -> Option<SigningVerdict> {
        match self.probe(url, file_name).await {
            Ok(verdict) => Some(verdict),
            Err(e) => {
                warn!(url, error = %e, "signing check failed, keeping metadata classification");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFICIAL: &str = "CN=FDroid, OU=FDroid, O=fdroid.org, L=ORG, ST=ORG, C=UK";

    #[test]
    fn test_verdict() {
        let official = format!("Signer #1 certificate DN: {OFFICIAL}\nSigner #1 certificate SHA-256 digest: 00");
        let developer = "Signer #1 certificate DN: CN=Jane Doe, O=Example\n";

        assert_eq!(verdict(&official, OFFICIAL), SigningVerdict::No);
        assert_eq!(verdict(developer, OFFICIAL), SigningVerdict::Yes);
    }

    #[tokio::test]
    async fn test_missing_tool_is_spawn_failure() {
        let signer = ApkSigner::new("/nonexistent/bin/apksigner");
        let err = signer
            .inspect(Path::new("/tmp/whatever.apk"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Signing(SigningError::SpawnFailed { .. })
        ));
    }
}
