use std::sync::Arc;

use anyhow::Result;

use crate::api::{AccountApi, ApiClient, BearerToken};
use crate::app::Config;
use crate::routing::{default_routes, not_found_route, Router};
use crate::session::{Account, FileStorage, MemoryStorage, SessionStorage, SessionStore};
use crate::signals::{LoadingSignal, Notifier};

/// Process-wide application context.
///
/// Created once at startup and shared by reference with every component
/// that needs session, routing, loading or notification state.
pub struct AppContext {
    /// Configuration
    pub config: Config,
    /// Client-side router
    pub router: Arc<Router>,
    /// Snackbar slot
    pub notifier: Arc<Notifier>,
    /// Global loading overlay
    pub loading: Arc<LoadingSignal>,
    /// Session lifecycle
    pub account: Arc<Account>,
}

impl AppContext {
    /// Wire the context from explicit collaborators
    pub fn new(
        config: Config,
        api: Arc<dyn AccountApi>,
        bearer: BearerToken,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let router = Arc::new(Router::new(default_routes(), not_found_route()));
        let notifier = Arc::new(Notifier::new(config.ui.snackbar_timeout()));
        let loading = Arc::new(LoadingSignal::new());
        let store = SessionStore::new(storage, config.session.storage_key.clone());
        let account = Arc::new(Account::new(
            api,
            bearer,
            store,
            router.clone(),
            notifier.clone(),
            loading.clone(),
        ));

        Self {
            config,
            router,
            notifier,
            loading,
            account,
        }
    }

    /// Build the real HTTP client and session storage from configuration
    pub fn from_config(config: Config, ephemeral: bool) -> Result<Self> {
        let bearer = BearerToken::new();
        let api = ApiClient::new(&config.api, bearer.clone())?;

        let storage: Arc<dyn SessionStorage> = if ephemeral || !config.session.persist {
            Arc::new(MemoryStorage::new())
        } else {
            Arc::new(FileStorage::new(config.session.resolve_dir()?))
        };

        Ok(Self::new(config, Arc::new(api), bearer, storage))
    }
}
