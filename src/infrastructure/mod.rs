//! Infrastructure layer: sessions, repositories and backend selection.

pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod repository;
pub mod session;

pub use factory::{
    AppEnvironment, ConfigurationError, FactoryError, RepositoryConfig, RepositoryFactory,
    StorageBackend, StorageMode,
};
pub use in_memory::SessionListRepository;
pub use postgres::{Parameter, PostgresListRepository, Statement};
pub use repository::{ListRepository, RepositoryError, RepositoryResult};
pub use session::{Flash, SessionData, SessionHandle, SessionId, SessionStore};
