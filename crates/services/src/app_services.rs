use std::sync::Arc;

use storage::remote::{RemoteConfig, RemoteQuizStore};
use storage::repository::{QuizResultRepository, Storage};

use crate::countdown::TickerRegistry;
use crate::error::AppServicesError;
use crate::quiz_data::QuizDataService;

/// Where quiz results are read from.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Sqlite { db_url: String },
    Remote(RemoteConfig),
    InMemory,
}

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    quiz_data: Arc<QuizDataService>,
    tickers: TickerRegistry,
}

impl AppServices {
    /// Open the configured store and build services on top of it.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the `SQLite` store cannot be opened or
    /// migrated.
    pub async fn connect(store: StoreConfig) -> Result<Self, AppServicesError> {
        let storage = match store {
            StoreConfig::Sqlite { db_url } => Storage::sqlite(&db_url).await?,
            StoreConfig::Remote(config) => {
                let quiz_results: Arc<dyn QuizResultRepository> =
                    Arc::new(RemoteQuizStore::new(config));
                Storage { quiz_results }
            }
            StoreConfig::InMemory => Storage::in_memory(),
        };
        Ok(Self::from_storage(storage))
    }

    #[must_use]
    pub fn from_storage(storage: Storage) -> Self {
        let quiz_data = Arc::new(QuizDataService::new(Arc::clone(&storage.quiz_results)));
        Self {
            storage,
            quiz_data,
            tickers: TickerRegistry::new(),
        }
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn quiz_data(&self) -> Arc<QuizDataService> {
        Arc::clone(&self.quiz_data)
    }

    #[must_use]
    pub fn tickers(&self) -> TickerRegistry {
        self.tickers.clone()
    }
}
