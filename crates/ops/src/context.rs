//! Operations context for dependency injection

use std::sync::Arc;
use vercheck_config::Config;
use vercheck_errors::{ConfigError, Error};
use vercheck_index::SnapshotCache;
use vercheck_net::{NetClient, NetConfig};
use vercheck_signing::{ApkSigner, SignatureProbe, SigningInspector};

/// Operations context providing access to all system components
pub struct OpsCtx {
    /// Effective configuration
    pub config: Config,
    /// Network client
    pub net: NetClient,
    /// Feed snapshot cache
    pub cache: SnapshotCache,
    /// Artifact signing check
    pub signing: SignatureProbe,
}

// No public constructor - use OpsContextBuilder instead

/// Builder for operations context
pub struct OpsContextBuilder {
    config: Option<Config>,
    net: Option<NetClient>,
    cache: Option<SnapshotCache>,
    inspector: Option<Arc<dyn SigningInspector>>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: None,
            net: None,
            cache: None,
            inspector: None,
        }
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set network client
    #[must_use]
    pub fn with_net(mut self, net: NetClient) -> Self {
        self.net = Some(net);
        self
    }

    /// Set snapshot cache
    #[must_use]
    pub fn with_cache(mut self, cache: SnapshotCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set signing inspector
    #[must_use]
    pub fn with_inspector(mut self, inspector: Arc<dyn SigningInspector>) -> Self {
        self.inspector = Some(inspector);
        self
    }

    /// Build the context
    ///
    /// Components that were not set are derived from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration was given or the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let config = self.config.ok_or_else(|| ConfigError::NotFound {
            path: "operations context configuration".to_string(),
        })?;

        let net = match self.net {
            Some(net) => net,
            None => NetClient::new(&NetConfig::from(&config.network))?,
        };
        let cache = self
            .cache
            .unwrap_or_else(|| SnapshotCache::new(config.cache_dir()));
        let inspector = self
            .inspector
            .unwrap_or_else(|| Arc::new(ApkSigner::new(&config.signing.tool)));
        let signing =
            SignatureProbe::new(net.clone(), inspector, config.signing.official_signer.clone());

        Ok(OpsCtx {
            config,
            net,
            cache,
            signing,
        })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
