//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use atlas_auth::{OwnershipGuard, PasswordHasher, SessionTokens};
use atlas_core::config::AppConfig;
use atlas_core::result::AppResult;
use atlas_database::repositories::{CollectionRepository, ResourceRepository, UserRepository};
use atlas_database::{
    CollectionStore, DatabasePool, HealthProbe, MemoryStore, ResourceStore, UserStore,
};
use atlas_service::{AuthService, CollectionService, ResourceService, SuggestionService};

/// The store handles every service is built from.
#[derive(Clone)]
pub struct Stores {
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Collections.
    pub collections: Arc<dyn CollectionStore>,
    /// Resources.
    pub resources: Arc<dyn ResourceStore>,
    /// Liveness probe for `/api/health`.
    pub health: Arc<dyn HealthProbe>,
}

impl Stores {
    /// Postgres repositories sharing one pool.
    pub fn postgres(pool: &DatabasePool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.pool().clone())),
            collections: Arc::new(CollectionRepository::new(pool.pool().clone())),
            resources: Arc::new(ResourceRepository::new(pool.pool().clone())),
            health: Arc::new(pool.clone()),
        }
    }

    /// One in-process store behind every trait.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            collections: store.clone(),
            resources: store.clone(),
            health: store,
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store liveness probe
    pub health: Arc<dyn HealthProbe>,

    // ── Services ─────────────────────────────────────────────
    /// Accounts and sessions
    pub auth: Arc<AuthService>,
    /// Collection CRUD
    pub collections: Arc<CollectionService>,
    /// Resource CRUD
    pub resources: Arc<ResourceService>,
    /// Metadata suggestions
    pub suggestions: Arc<SuggestionService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires every service from configuration and store handles.
    pub fn new(config: AppConfig, stores: Stores) -> AppResult<Self> {
        let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let tokens = Arc::new(SessionTokens::new(&config.auth));
        let guard = OwnershipGuard::new(stores.collections.clone(), stores.resources.clone());

        let auth = Arc::new(AuthService::new(stores.users.clone(), hasher, tokens));
        let collections = Arc::new(CollectionService::new(
            stores.collections.clone(),
            guard.clone(),
        ));
        let resources = Arc::new(ResourceService::new(stores.resources.clone(), guard));
        let suggestions = Arc::new(SuggestionService::new(&config.suggestions)?);

        Ok(Self {
            config: Arc::new(config),
            health: stores.health,
            auth,
            collections,
            resources,
            suggestions,
        })
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.config.auth.cookie_name
    }
}
