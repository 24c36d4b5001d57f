//! Application Context
//!
//! Owns the store, the creation session and the config for one app session,
//! and hands out screens wired to them.

use crate::config::{AppConfig, ConfigError};
use crate::domain::{DomainResult, ListId};
use crate::screens::{ListDetailScreen, ListOverviewScreen, NewListScreen, Picker, SignInScreen};
use crate::session::CreationSession;
use crate::store::ListStore;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logger(#[from] rolling_logger::LoggerError),
}

pub struct AppContext {
    pub config: AppConfig,
    pub store: ListStore,
    pub session: CreationSession,
}

impl AppContext {
    /// Context over a fresh store, no logging setup
    pub fn new(config: AppConfig) -> Self {
        Self::with_store(config, ListStore::new())
    }

    pub fn with_store(config: AppConfig, store: ListStore) -> Self {
        let session = CreationSession::new(store.clone());
        Self { config, store, session }
    }

    /// Start logging (when `log_dir` is configured) and build the context
    pub fn bootstrap(config: AppConfig) -> Result<Self, BootstrapError> {
        if let Some(log_dir) = &config.log_dir {
            let level = config.level_filter()?;
            match rolling_logger::init_logger_with_level(log_dir.clone(), &config.app_name, level) {
                Ok(()) => {}
                Err(rolling_logger::LoggerError::AlreadyInitialized) => {
                    log::debug!("Logger already running, keeping it");
                }
                Err(e) => return Err(e.into()),
            }
        }

        log::info!("{} starting", config.app_name);
        Ok(Self::new(config))
    }

    pub fn sign_in_screen(&self) -> SignInScreen {
        SignInScreen::new()
    }

    pub fn overview_screen(&self) -> ListOverviewScreen {
        ListOverviewScreen::new(self.store.clone(), self.config.default_list_order)
    }

    pub fn detail_screen(&self, list_id: ListId) -> DomainResult<ListDetailScreen> {
        ListDetailScreen::open(self.store.clone(), list_id)
    }

    pub fn new_list_screen(&self) -> NewListScreen {
        NewListScreen::new(&self.config.palette)
    }

    pub fn emoji_picker(&self) -> Picker {
        Picker::emoji(&self.config.palette)
    }

    pub fn color_picker(&self) -> Picker {
        Picker::color(&self.config.palette)
    }
}
