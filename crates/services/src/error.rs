//! Shared error types for the services crate.

use thiserror::Error;

use storage::remote::RemoteConfigError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Remote(#[from] RemoteConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
