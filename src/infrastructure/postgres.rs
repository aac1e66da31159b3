//! `PostgreSQL` repository implementation.
//!
//! Every statement is routed through [`Statement`], which logs the SQL text
//! and its parameter values and then binds the parameters positionally.
//! Values are never interpolated into SQL text.
//!
//! No statement runs inside an explicit transaction. Deleting a list relies
//! on the `ON DELETE CASCADE` foreign key to remove its todos.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE lists (
//!     id BIGSERIAL PRIMARY KEY,
//!     name TEXT NOT NULL UNIQUE
//! );
//!
//! CREATE TABLE todos (
//!     id BIGINT NOT NULL,
//!     list_id BIGINT NOT NULL REFERENCES lists (id) ON DELETE CASCADE,
//!     name TEXT NOT NULL,
//!     complete BOOLEAN NOT NULL DEFAULT false,
//!     PRIMARY KEY (list_id, id)
//! );
//! ```

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

use crate::domain::{List, ListId, Todo, TodoId};
use crate::infrastructure::{ListRepository, RepositoryError, RepositoryResult};

/// Schema applied at startup; every statement is idempotent.
pub const SCHEMA: &str = include_str!("../../migrations/schema.sql");

// =============================================================================
// Statement
// =============================================================================

/// A positional statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// `BIGINT` value.
    Integer(i64),
    /// `TEXT` value.
    Text(String),
    /// `BOOLEAN` value.
    Boolean(bool),
}

impl From<ListId> for Parameter {
    fn from(id: ListId) -> Self {
        Self::Integer(id.value())
    }
}

impl From<TodoId> for Parameter {
    fn from(id: TodoId) -> Self {
        Self::Integer(id.value())
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<bool> for Parameter {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// SQL text plus its positional parameters (`$1`, `$2`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: &'static str,
    parameters: Vec<Parameter>,
}

impl Statement {
    /// Creates a statement without parameters.
    #[must_use]
    pub const fn new(sql: &'static str) -> Self {
        Self {
            sql,
            parameters: Vec::new(),
        }
    }

    /// Appends the next positional parameter.
    #[must_use]
    pub fn bind(mut self, parameter: impl Into<Parameter>) -> Self {
        self.parameters.push(parameter.into());
        self
    }

    /// Returns the SQL text.
    #[must_use]
    pub const fn sql(&self) -> &'static str {
        self.sql
    }

    /// Returns the bound parameters in position order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Logs the statement and builds the bound `sqlx` query.
    fn into_query(self) -> Query<'static, Postgres, PgArguments> {
        tracing::info!(statement = self.sql, parameters = ?self.parameters, "Executing statement");

        self.parameters
            .into_iter()
            .fold(sqlx::query(self.sql), |query, parameter| match parameter {
                Parameter::Integer(value) => query.bind(value),
                Parameter::Text(value) => query.bind(value),
                Parameter::Boolean(value) => query.bind(value),
            })
    }

    async fn execute(self, pool: &PgPool) -> Result<u64, RepositoryError> {
        let result = self.into_query().execute(pool).await?;
        Ok(result.rows_affected())
    }

    async fn fetch_all(self, pool: &PgPool) -> Result<Vec<PgRow>, RepositoryError> {
        Ok(self.into_query().fetch_all(pool).await?)
    }

    async fn fetch_optional(self, pool: &PgPool) -> Result<Option<PgRow>, RepositoryError> {
        Ok(self.into_query().fetch_optional(pool).await?)
    }
}

// =============================================================================
// Statements
// =============================================================================

const SELECT_ALL_LISTS: &str = "SELECT id, name FROM lists ORDER BY id";
const SELECT_LIST: &str = "SELECT id, name FROM lists WHERE id = $1";
const SELECT_TODOS: &str = "SELECT id, name, complete FROM todos WHERE list_id = $1 ORDER BY id";
const INSERT_LIST: &str = "INSERT INTO lists (name) VALUES ($1) RETURNING id";
const UPDATE_LIST_NAME: &str = "UPDATE lists SET name = $2 WHERE id = $1";
const DELETE_LIST: &str = "DELETE FROM lists WHERE id = $1";
const INSERT_TODO: &str = "INSERT INTO todos (id, list_id, name) \
     SELECT COALESCE(MAX(todos.id), 0) + 1, lists.id, $2 \
     FROM lists LEFT JOIN todos ON todos.list_id = lists.id \
     WHERE lists.id = $1 \
     GROUP BY lists.id \
     RETURNING id";
const DELETE_TODO: &str = "DELETE FROM todos WHERE list_id = $1 AND id = $2";
const UPDATE_TODO: &str = "UPDATE todos SET complete = $1 WHERE list_id = $2 AND id = $3";
const COMPLETE_ALL_TODOS: &str = "UPDATE todos SET complete = true WHERE list_id = $1";

// =============================================================================
// Row Mapping
// =============================================================================

fn list_from_row(row: &PgRow) -> Result<List, RepositoryError> {
    let id: i64 = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    Ok(List::new(ListId::new(id), name))
}

fn todo_from_row(row: &PgRow) -> Result<Todo, RepositoryError> {
    let id: i64 = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let complete: bool = row.try_get("complete")?;
    Ok(Todo::new(TodoId::new(id), name).with_completed(complete))
}

// =============================================================================
// PostgreSQL List Repository
// =============================================================================

/// `PostgreSQL` implementation of [`ListRepository`].
///
/// # Example
///
/// ```ignore
/// let pool = PgPool::connect("postgres://localhost/todos").await?;
/// let repository = PostgresListRepository::new(pool);
/// let id = repository.create_list("Groceries").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresListRepository {
    pool: PgPool,
}

impl PostgresListRepository {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Loads the todos of one list, in id order.
    async fn todos_of(&self, list_id: ListId) -> Result<Vec<Todo>, RepositoryError> {
        Statement::new(SELECT_TODOS)
            .bind(list_id)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(todo_from_row)
            .collect()
    }

    async fn with_todos(&self, list: List) -> Result<List, RepositoryError> {
        let todos = self.todos_of(list.id).await?;
        Ok(list.with_todos(todos))
    }
}

impl ListRepository for PostgresListRepository {
    fn all_lists(&self) -> RepositoryResult<'_, Vec<List>> {
        Box::pin(async move {
            let rows = Statement::new(SELECT_ALL_LISTS).fetch_all(&self.pool).await?;

            let mut lists = Vec::with_capacity(rows.len());
            for row in &rows {
                let list = list_from_row(row)?;
                lists.push(self.with_todos(list).await?);
            }
            Ok(lists)
        })
    }

    fn find_list(&self, id: ListId) -> RepositoryResult<'_, List> {
        Box::pin(async move {
            let row = Statement::new(SELECT_LIST)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(RepositoryError::NotFound(id))?;

            self.with_todos(list_from_row(&row)?).await
        })
    }

    fn create_list(&self, name: &str) -> RepositoryResult<'_, ListId> {
        let statement = Statement::new(INSERT_LIST).bind(name);
        Box::pin(async move {
            let row = statement
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| RepositoryError::DatabaseError("INSERT returned no id".to_string()))?;
            Ok(ListId::new(row.try_get("id")?))
        })
    }

    fn rename_list(&self, id: ListId, name: &str) -> RepositoryResult<'_, ()> {
        let statement = Statement::new(UPDATE_LIST_NAME).bind(id).bind(name);
        Box::pin(async move {
            statement.execute(&self.pool).await?;
            Ok(())
        })
    }

    fn delete_list(&self, id: ListId) -> RepositoryResult<'_, ()> {
        Box::pin(async move {
            Statement::new(DELETE_LIST).bind(id).execute(&self.pool).await?;
            Ok(())
        })
    }

    fn create_todo(&self, list_id: ListId, name: &str) -> RepositoryResult<'_, TodoId> {
        let statement = Statement::new(INSERT_TODO).bind(list_id).bind(name);
        Box::pin(async move {
            let row = statement
                .fetch_optional(&self.pool)
                .await?
                .ok_or(RepositoryError::NotFound(list_id))?;
            Ok(TodoId::new(row.try_get("id")?))
        })
    }

    fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> RepositoryResult<'_, ()> {
        Box::pin(async move {
            Statement::new(DELETE_TODO)
                .bind(list_id)
                .bind(todo_id)
                .execute(&self.pool)
                .await?;
            Ok(())
        })
    }

    fn set_todo_completed(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> RepositoryResult<'_, ()> {
        Box::pin(async move {
            Statement::new(UPDATE_TODO)
                .bind(completed)
                .bind(list_id)
                .bind(todo_id)
                .execute(&self.pool)
                .await?;
            Ok(())
        })
    }

    fn complete_all_todos(&self, list_id: ListId) -> RepositoryResult<'_, ()> {
        Box::pin(async move {
            Statement::new(COMPLETE_ALL_TODOS)
                .bind(list_id)
                .execute(&self.pool)
                .await?;
            Ok(())
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
