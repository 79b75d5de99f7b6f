//! Client-side state.
//!
//! Each concern gets one store. [`AppContext`] owns one instance of each and is
//! handed to whatever drives the UI; nothing here is global.

mod cookies;
mod forum;
mod projects;
mod toaster;
mod users;

use std::sync::Arc;
use std::time::Duration;

pub use cookies::{ConsentState, CookieConsent};
pub use forum::ForumStore;
pub use projects::{ProjectStore, filter_projects};
pub use toaster::{DEFAULT_TIMEOUT, Toast, ToastStatus, Toaster};
pub use users::{SeedList, UsersStore};

use crate::api::ApiClient;
use crate::auth::{FirebaseAuth, IdentityProvider};
use crate::config::Config;
use crate::error::Result;
use crate::navigation::{self, Navigation, Route};
use crate::services::{OrganizationService, ProjectService, UserService};
use crate::storage::{SqliteStorage, StorageAdapter};

pub struct AppContext<P> {
    pub projects: ProjectStore,
    pub users: UsersStore<P>,
    pub forum: ForumStore,
    pub toaster: Toaster,
    pub cookies: CookieConsent,
    pub organizations: OrganizationService,
}

impl<P: IdentityProvider> AppContext<P> {
    pub fn new(api: ApiClient, provider: P) -> Self {
        let storage: Arc<dyn StorageAdapter> = Arc::clone(api.storage());
        let project_service = ProjectService::new(api.clone());

        Self {
            projects: ProjectStore::new(project_service.clone()),
            users: UsersStore::new(provider, UserService::new(api.clone()), Arc::clone(&storage)),
            forum: ForumStore::new(project_service),
            toaster: Toaster::new(),
            cookies: CookieConsent::new(storage),
            organizations: OrganizationService::new(api),
        }
    }

    /// Run the authenticated-route guard against the current session.
    pub fn navigate(&self, route: Route) -> Navigation {
        navigation::guard(route, self.users.is_signed_in())
    }

    /// Cancel pending toast timers and drop in-memory session state.
    /// Durable storage is left as is.
    pub fn teardown(mut self) {
        self.toaster.clear();
        self.users.clear_cache();
        tracing::debug!("Application context torn down");
    }
}

impl AppContext<FirebaseAuth> {
    /// Wire SQLite storage, the REST client and Firebase auth from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let storage: Arc<dyn StorageAdapter> = Arc::new(SqliteStorage::open(&config.storage_path)?);
        let api = ApiClient::new(
            &config.api_base_url,
            storage,
            Some(Duration::from_secs(config.request_timeout_secs)),
        )?;
        let provider = FirebaseAuth::from_config(config)?;
        Ok(Self::new(api, provider))
    }
}
