use std::sync::Arc;

use crate::app::Result;
use crate::client::http::HttpDigestApi;
use crate::client::DigestApi;
use crate::config::Config;
use crate::service::DigestService;

/// Wires the configured backend client and the digest service together,
/// once, at process start. Consumers hold the context (or the service
/// handle inside it) rather than reaching for any global state.
pub struct AppContext {
    pub config: Config,
    pub api: Arc<dyn DigestApi + Send + Sync>,
    pub service: Arc<DigestService>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let base = config.api.base_url()?;
        let api: Arc<dyn DigestApi + Send + Sync> = Arc::new(HttpDigestApi::new(base));
        Ok(Self::with_api(config, api))
    }

    /// Build a context around any collaborator implementation.
    pub fn with_api(config: Config, api: Arc<dyn DigestApi + Send + Sync>) -> Self {
        let service = Arc::new(DigestService::new(api.clone()));
        Self {
            config,
            api,
            service,
        }
    }
}
