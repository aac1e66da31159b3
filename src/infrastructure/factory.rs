//! Repository factory for runtime backend selection.
//!
//! The storage variant is chosen once at startup. The factory produces a
//! [`StorageBackend`], which then opens a [`ListRepository`] for each request
//! (the session variant needs that request's session).
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `session` (default) | `postgres`
//! - `APP_ENV`: `development` (default) | `production`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required in production when
//!   `STORAGE_MODE=postgres`, defaults to the local `todos` database otherwise)
//!
//! # Example
//!
//! ```ignore
//! let config = RepositoryConfig::from_env()?;
//! let backend = RepositoryFactory::new(config).create().await?;
//! let repository = backend.open(&session);
//! ```

use std::env;
use std::str::FromStr;

use sqlx::PgPool;
use thiserror::Error;

use super::{
    ListRepository, PostgresListRepository, SessionHandle, SessionListRepository, postgres,
};

/// Database used in development when `DATABASE_URL` is not set.
pub const DEFAULT_DEVELOPMENT_DATABASE_URL: &str = "postgres://localhost/todos";

// =============================================================================
// Configuration Types
// =============================================================================

/// Where lists and todos are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Lists live in the browser's server-side session.
    #[default]
    Session,
    /// Lists live in `PostgreSQL`, shared by every session.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    /// Parses a storage mode from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "session" | "memory" | "in_memory" => Ok(Self::Session),
            "postgres" | "postgresql" | "pg" | "database" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Deployment environment, which decides the fallback database target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    /// Local development.
    #[default]
    Development,
    /// Production deployment.
    Production,
}

impl FromStr for AppEnvironment {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigurationError::InvalidEnvironment(value.to_string())),
        }
    }
}

/// Configuration for the repository factory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Storage variant.
    pub storage_mode: StorageMode,
    /// Deployment environment.
    pub environment: AppEnvironment,
    /// `PostgreSQL` connection URL, if explicitly configured.
    pub database_url: Option<String>,
}

impl RepositoryConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> RepositoryConfigBuilder {
        RepositoryConfigBuilder::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if:
    /// - `STORAGE_MODE` or `APP_ENV` contains an invalid value
    /// - `DATABASE_URL` is missing in production with `STORAGE_MODE=postgres`
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let storage_mode = parse_env_var("STORAGE_MODE", ConfigurationError::InvalidStorageMode)?;
        let environment = parse_env_var("APP_ENV", ConfigurationError::InvalidEnvironment)?;

        // Empty or whitespace-only values count as unset
        let database_url = env::var("DATABASE_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let config = Self {
            storage_mode,
            environment,
            database_url,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingDatabaseUrl` when production
    /// database storage has no explicit URL.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.storage_mode == StorageMode::Postgres
            && self.environment == AppEnvironment::Production
            && self.database_url.is_none()
        {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }

        Ok(())
    }

    /// Returns the database URL to connect to.
    ///
    /// Falls back to the local `todos` database outside production.
    #[must_use]
    pub fn effective_database_url(&self) -> Option<&str> {
        match (&self.database_url, self.environment) {
            (Some(url), _) => Some(url.as_str()),
            (None, AppEnvironment::Development) => Some(DEFAULT_DEVELOPMENT_DATABASE_URL),
            (None, AppEnvironment::Production) => None,
        }
    }
}

fn parse_env_var<T>(
    key: &str,
    non_unicode: impl FnOnce(String) -> ConfigurationError,
) -> Result<T, ConfigurationError>
where
    T: FromStr<Err = ConfigurationError> + Default,
{
    match env::var(key) {
        Ok(value) => value.parse(),
        Err(env::VarError::NotPresent) => Ok(T::default()),
        Err(env::VarError::NotUnicode(_)) => Err(non_unicode("<non-UTF-8 value>".to_string())),
    }
}

/// Builder for `RepositoryConfig`.
///
/// # Example
///
/// ```ignore
/// let config = RepositoryConfig::builder()
///     .storage_mode(StorageMode::Postgres)
///     .database_url("postgres://localhost/todos")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfigBuilder {
    storage_mode: StorageMode,
    environment: AppEnvironment,
    database_url: Option<String>,
}

impl RepositoryConfigBuilder {
    /// Sets the storage mode.
    #[must_use]
    pub const fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    /// Sets the deployment environment.
    #[must_use]
    pub const fn environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets the `PostgreSQL` database URL.
    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid.
    pub fn build(self) -> Result<RepositoryConfig, ConfigurationError> {
        let config = RepositoryConfig {
            storage_mode: self.storage_mode,
            environment: self.environment,
            database_url: self.database_url,
        };

        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'session' or 'postgres'")]
    InvalidStorageMode(String),

    /// Invalid environment value.
    #[error("Invalid environment: '{0}'. Expected 'development' or 'production'")]
    InvalidEnvironment(String),

    /// Missing `DATABASE_URL` in production.
    #[error("DATABASE_URL environment variable is required when STORAGE_MODE=postgres in production")]
    MissingDatabaseUrl,
}

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    DatabaseConnection(String),

    /// Schema creation failed.
    #[error("Schema initialization error: {0}")]
    Schema(String),
}

// =============================================================================
// Storage Backend
// =============================================================================

/// The storage variant selected at startup.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Each request stores lists in its own session.
    Session,
    /// Every request shares the `PostgreSQL` pool.
    Postgres(PgPool),
}

impl StorageBackend {
    /// Opens the repository serving a single request.
    #[must_use]
    pub fn open(&self, session: &SessionHandle) -> Box<dyn ListRepository> {
        match self {
            Self::Session => Box::new(SessionListRepository::new(session.clone())),
            Self::Postgres(pool) => Box::new(PostgresListRepository::new(pool.clone())),
        }
    }

    /// Returns the storage mode this backend implements.
    #[must_use]
    pub const fn mode(&self) -> StorageMode {
        match self {
            Self::Session => StorageMode::Session,
            Self::Postgres(_) => StorageMode::Postgres,
        }
    }
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Factory for the storage backend based on configuration.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    /// Creates a new repository factory with the given configuration.
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Creates the storage backend.
    ///
    /// For the database variant this connects to `PostgreSQL` and applies
    /// the schema.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the database connection or schema creation fails.
    pub async fn create(&self) -> Result<StorageBackend, FactoryError> {
        match self.config.storage_mode {
            StorageMode::Session => Ok(StorageBackend::Session),
            StorageMode::Postgres => {
                let pool = self.create_postgres_pool().await?;
                Self::initialize_schema(&pool).await?;
                Ok(StorageBackend::Postgres(pool))
            }
        }
    }

    /// Creates a `PostgreSQL` connection pool.
    async fn create_postgres_pool(&self) -> Result<PgPool, FactoryError> {
        let database_url = self
            .config
            .effective_database_url()
            .ok_or(ConfigurationError::MissingDatabaseUrl)?;

        PgPool::connect(database_url)
            .await
            .map_err(|error| FactoryError::DatabaseConnection(error.to_string()))
    }

    async fn initialize_schema(pool: &PgPool) -> Result<(), FactoryError> {
        tracing::info!("Applying database schema");
        sqlx::raw_sql(postgres::SCHEMA)
            .execute(pool)
            .await
            .map(|_| ())
            .map_err(|error| FactoryError::Schema(error.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SessionId;
    use rstest::rstest;

    // -------------------------------------------------------------------------
    // StorageMode Tests
    // -------------------------------------------------------------------------

    #[rstest]
    #[case("session", StorageMode::Session)]
    #[case("SESSION", StorageMode::Session)]
    #[case("memory", StorageMode::Session)]
    #[case("postgres", StorageMode::Postgres)]
    #[case("postgresql", StorageMode::Postgres)]
    #[case("pg", StorageMode::Postgres)]
    #[case("POSTGRES", StorageMode::Postgres)]
    fn test_storage_mode_from_str_valid(#[case] input: &str, #[case] expected: StorageMode) {
        let result: Result<StorageMode, _> = input.parse();
        assert_eq!(result, Ok(expected));
    }

    #[rstest]
    #[case("invalid")]
    #[case("redis")]
    #[case("")]
    fn test_storage_mode_from_str_invalid(#[case] input: &str) {
        let result: Result<StorageMode, _> = input.parse();
        assert_eq!(
            result,
            Err(ConfigurationError::InvalidStorageMode(input.to_string()))
        );
    }

    #[rstest]
    fn test_storage_mode_default() {
        assert_eq!(StorageMode::default(), StorageMode::Session);
    }

    // -------------------------------------------------------------------------
    // AppEnvironment Tests
    // -------------------------------------------------------------------------

    #[rstest]
    #[case("development", AppEnvironment::Development)]
    #[case("dev", AppEnvironment::Development)]
    #[case("production", AppEnvironment::Production)]
    #[case("PROD", AppEnvironment::Production)]
    fn test_environment_from_str_valid(#[case] input: &str, #[case] expected: AppEnvironment) {
        assert_eq!(input.parse::<AppEnvironment>(), Ok(expected));
    }

    #[rstest]
    fn test_environment_from_str_invalid() {
        assert_eq!(
            "staging".parse::<AppEnvironment>(),
            Err(ConfigurationError::InvalidEnvironment("staging".to_string()))
        );
    }

    // -------------------------------------------------------------------------
    // RepositoryConfig Tests
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_builder_defaults_to_session() {
        let config = RepositoryConfig::builder().build().unwrap();
        assert_eq!(config.storage_mode, StorageMode::Session);
        assert_eq!(config.environment, AppEnvironment::Development);
        assert!(config.database_url.is_none());
    }

    #[rstest]
    fn test_production_postgres_requires_url() {
        let result = RepositoryConfig::builder()
            .storage_mode(StorageMode::Postgres)
            .environment(AppEnvironment::Production)
            .build();
        assert_eq!(result, Err(ConfigurationError::MissingDatabaseUrl));
    }

    #[rstest]
    fn test_development_postgres_falls_back_to_local_database() {
        let config = RepositoryConfig::builder()
            .storage_mode(StorageMode::Postgres)
            .build()
            .unwrap();
        assert_eq!(
            config.effective_database_url(),
            Some(DEFAULT_DEVELOPMENT_DATABASE_URL)
        );
    }

    #[rstest]
    fn test_explicit_url_wins() {
        let config = RepositoryConfig::builder()
            .storage_mode(StorageMode::Postgres)
            .environment(AppEnvironment::Production)
            .database_url("postgres://db.example/todos")
            .build()
            .unwrap();
        assert_eq!(
            config.effective_database_url(),
            Some("postgres://db.example/todos")
        );
    }

    // -------------------------------------------------------------------------
    // Factory Tests
    // -------------------------------------------------------------------------

    #[rstest]
    #[tokio::test]
    async fn test_factory_creates_session_backend() {
        let factory = RepositoryFactory::new(RepositoryConfig::default());
        let backend = factory.create().await.unwrap();
        assert_eq!(backend.mode(), StorageMode::Session);
    }

    #[rstest]
    #[tokio::test]
    async fn test_session_backend_opens_session_scoped_repository() {
        let backend = StorageBackend::Session;
        let session = SessionHandle::new(SessionId::generate());

        let repository = backend.open(&session);
        repository.create_list("Groceries").await.unwrap();

        let stored = session.read(|data| data.lists.len()).await;
        assert_eq!(stored, 1);
    }
}
