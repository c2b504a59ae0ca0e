#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for vercheck
//!
//! This crate handles the HTTP side of the tool: fetching feed documents
//! into memory and downloading release artifacts to disk.

mod client;

pub use client::{NetClient, NetConfig};

use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;
use vercheck_errors::{Error, NetworkError, StorageError};

/// Fetch binary content from a URL
///
/// # Errors
///
/// Returns an error if the HTTP request fails, the server returns an error status,
/// or the response body cannot be read as bytes.
pub async fn fetch_bytes(client: &NetClient, url: &str) -> Result<Vec<u8>, Error> {
    parse_url(url)?;
    let response = client.get(url).await?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| NetClient::convert_error(url, &e))?;

    debug!(url, bytes = bytes.len(), "fetched");
    Ok(bytes.to_vec())
}

/// Download a resource to `dest`, returning the number of bytes written
///
/// # Errors
///
/// Returns an error if the request fails or the file cannot be written.
pub async fn download_file(client: &NetClient, url: &str, dest: &Path) -> Result<u64, Error> {
    parse_url(url)?;
    let mut response = client.get(url).await?;

    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| StorageError::from_io_with_path(&e, dest))?;
    let mut written = 0u64;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| NetClient::convert_error(url, &e))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, dest))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .map_err(|e| StorageError::from_io_with_path(&e, dest))?;

    debug!(url, dest = %dest.display(), bytes = written, "downloaded");
    Ok(written)
}

/// Parse and validate a URL
///
/// # Errors
///
/// Returns an error if the URL string is malformed or invalid according to RFC 3986.
pub fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{url}: {e}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://example.com").is_ok());
        assert!(parse_url("not a url").is_err());
    }

    #[test]
    fn test_net_config_from_settings() {
        let settings = vercheck_config::NetworkConfig {
            timeout: 12,
            connect_timeout: 3,
        };
        let config = NetConfig::from(&settings);
        assert_eq!(config.timeout, std::time::Duration::from_secs(12));
        assert_eq!(config.connect_timeout, std::time::Duration::from_secs(3));
        assert!(config.user_agent.starts_with("vercheck/"));
    }
}
