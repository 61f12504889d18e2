use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::Store;
use crate::services::{AccountService, NoteService};

/// Process-wide state built once at startup and handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: TokenService,
    pub accounts: AccountService,
    pub notes: NoteService,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let tokens = TokenService::new(&config.security.jwt_secret, config.security.jwt_expiry_hours);
        Self {
            accounts: AccountService::new(store.clone(), tokens.clone()),
            notes: NoteService::new(store.clone()),
            config: Arc::new(config),
            tokens,
            store,
        }
    }
}
