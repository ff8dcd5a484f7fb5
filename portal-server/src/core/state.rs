use std::sync::Arc;

use portal_client::auth::provider_from_config;
use portal_client::{
    CatalogService, CatalogStore, HttpClient, IdentityProvider, NetworkHttpClient, PostgrestStore,
    SyncTrigger,
};

use crate::auth::SessionRegistry;
use crate::core::{Config, Result};

/// Server state shared by every handler
///
/// Cheap to clone: every field is behind an `Arc`.
///
/// | Field | Meaning |
/// |------|------|
/// | config | immutable configuration |
/// | catalog | fetch adapter and favorite toggle |
/// | sync | webhook trigger |
/// | identity | identity provider behind the login endpoint |
/// | sessions | issued portal sessions |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub catalog: CatalogService,
    pub sync: SyncTrigger,
    pub identity: Arc<dyn IdentityProvider>,
    pub sessions: Arc<SessionRegistry>,
}

impl ServerState {
    /// Wire the network-backed services
    ///
    /// Fails when the catalog store or the selected identity provider is not
    /// configured.
    pub fn initialize(config: &Config) -> Result<Self> {
        let http: Arc<dyn HttpClient> = Arc::new(NetworkHttpClient::new(config.client.timeout())?);
        let store = Arc::new(PostgrestStore::from_config(http.clone(), &config.client)?);
        let identity = provider_from_config(http.clone(), &config.client)?;
        Ok(Self::new(config.clone(), store, http, identity))
    }

    /// Assemble state from explicit parts
    pub fn new(
        config: Config,
        store: Arc<dyn CatalogStore>,
        http: Arc<dyn HttpClient>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let catalog = CatalogService::new(store, config.client.timeout());
        let sync = SyncTrigger::from_config(http, &config.client);
        let sessions = Arc::new(SessionRegistry::new(config.session_ttl_secs));
        Self {
            config: Arc::new(config),
            catalog,
            sync,
            identity,
            sessions,
        }
    }

    /// Print base from configuration
    pub fn print_base(&self) -> Option<String> {
        self.config.client.print_base()
    }
}
