use std::sync::Arc;

use cinetrack_auth::{AccessLevel, TokenService};
use cinetrack_config::{AccessConfig, CorsConfig, JwtConfig, ServerConfig};
use cinetrack_db::{MemoryStore, PgStore, UserStore, WatchlistStore, init_db_pool, run_migrations};
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub watchlist: Arc<dyn WatchlistStore>,
    pub tokens: TokenService,
    pub cors_config: CorsConfig,
    /// Allow-list guarding the staff routes, resolved once from configuration.
    pub staff_access: AccessLevel,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        watchlist: Arc<dyn WatchlistStore>,
        tokens: TokenService,
        cors_config: CorsConfig,
        access_config: &AccessConfig,
    ) -> Self {
        Self {
            users,
            watchlist,
            tokens,
            cors_config,
            staff_access: AccessLevel::staff(access_config),
        }
    }

    /// State backed by a fresh [`MemoryStore`].
    pub fn in_memory(tokens: TokenService, access_config: &AccessConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(
            store.clone(),
            store,
            tokens,
            CorsConfig {
                allowed_origins: Vec::new(),
            },
            access_config,
        )
    }
}

/// Builds the state from the environment. Without `DATABASE_URL` the API
/// runs on in-memory stores and loses all data on restart.
pub async fn init_app_state(server: &ServerConfig) -> anyhow::Result<AppState> {
    let tokens = TokenService::new(&JwtConfig::from_env());
    let cors_config = CorsConfig::from_env();
    let access_config = AccessConfig::from_env();

    let state = match &server.database_url {
        Some(url) => {
            let pool = init_db_pool(url).await?;
            run_migrations(&pool).await?;
            let store = Arc::new(PgStore::new(pool));
            AppState::new(store.clone(), store, tokens, cors_config, &access_config)
        }
        None => {
            warn!("DATABASE_URL is not set; using in-memory stores");
            let store = Arc::new(MemoryStore::new());
            AppState::new(store.clone(), store, tokens, cors_config, &access_config)
        }
    };

    info!(staff_roles = ?access_config.staff_roles, "Application state initialized");
    Ok(state)
}
