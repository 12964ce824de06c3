//! Generic DAO: the query-dispatch surface shared by all entity DAOs.
//!
//! Every operation is a thin delegation to `sqlx` against the shared pool:
//! CRUD over [`Record`] types, named-query execution through the
//! [`QueryCatalog`], native SQL execution, chunked batch writes, and
//! windowed (offset/limit) fetches with positional parameter binding.

use crate::query::{
    bind_params, bind_params_as, bind_params_scalar, expand_in_placeholder, Param, QueryCatalog,
};
use crate::record::{
    delete_sql, insert_sql, select_all_sql, select_by_id_sql, update_sql, Record,
};
use crate::DatabasePoolInterface;
use docstore_core::{DocstoreError, DocstoreResult, Window};
use std::sync::Arc;
use tracing::debug;

/// Rows written per transaction in batch operations.
///
/// One consistent chunk size for both persist and update batches.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Generic data access object.
///
/// Entity DAOs hold one of these and express their operations in terms of
/// it; nothing here knows about any particular table beyond what the
/// [`Record`] trait and the catalog provide.
#[derive(Clone)]
pub struct GenericDao {
    pool: Arc<dyn DatabasePoolInterface>,
    catalog: Arc<QueryCatalog>,
    batch_size: usize,
}

impl GenericDao {
    /// Creates a new generic DAO over the given pool and query catalog.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, catalog: Arc<QueryCatalog>) -> Self {
        Self {
            pool,
            catalog,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Overrides the batch chunk size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// The configured batch chunk size.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The named-query catalog in use.
    #[must_use]
    pub fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }

    // =========================================================================
    // CRUD over Record types
    // =========================================================================

    /// Stores a new record and returns the storage-assigned identifier.
    pub async fn store<R: Record>(&self, record: &R) -> DocstoreResult<i64> {
        debug!("Storing new {} row", R::TABLE);

        let sql = insert_sql::<R>();
        let result = bind_params(sqlx::query(&sql), &record.values())
            .execute(self.pool.inner())
            .await?;

        Ok(result.last_insert_id() as i64)
    }

    /// Saves all changes made to an existing record.
    ///
    /// Fails with [`DocstoreError::Validation`] if the record has never been
    /// stored and with [`DocstoreError::NotFound`] if no row matched.
    pub async fn update<R: Record>(&self, record: &R) -> DocstoreResult<()> {
        let id = record.id().ok_or_else(|| {
            DocstoreError::validation(format!("{} record has no identifier", R::TABLE))
        })?;
        debug!("Updating {} row {}", R::TABLE, id);

        let sql = update_sql::<R>();
        let mut params = record.values();
        params.push(id.into());

        let result = bind_params(sqlx::query(&sql), &params)
            .execute(self.pool.inner())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DocstoreError::not_found(R::TABLE, id));
        }
        Ok(())
    }

    /// Updates every record in the slice, returning the affected row count.
    pub async fn update_all<R: Record>(&self, records: &[R]) -> DocstoreResult<u64> {
        if records.is_empty() {
            return Err(DocstoreError::validation("record list cannot be empty"));
        }
        debug!("Updating {} {} rows", records.len(), R::TABLE);

        for record in records {
            self.update(record).await?;
        }
        Ok(records.len() as u64)
    }

    /// Removes a stored record. Returns `true` if a row was deleted.
    pub async fn remove<R: Record>(&self, record: &R) -> DocstoreResult<bool> {
        let id = record.id().ok_or_else(|| {
            DocstoreError::validation(format!("{} record has no identifier", R::TABLE))
        })?;
        self.remove_by_id::<R>(id).await
    }

    /// Removes a row by primary key. Returns `true` if a row was deleted.
    pub async fn remove_by_id<R: Record>(&self, id: i64) -> DocstoreResult<bool> {
        debug!("Removing {} row {}", R::TABLE, id);

        let sql = delete_sql::<R>();
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Retrieves a row by primary key.
    pub async fn get<R: Record>(&self, id: i64) -> DocstoreResult<Option<R>> {
        debug!("Fetching {} row {}", R::TABLE, id);

        let sql = select_by_id_sql::<R>();
        let row = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row)
    }

    /// Loads all rows of the record's table.
    pub async fn load_all<R: Record>(&self) -> DocstoreResult<Vec<R>> {
        debug!("Loading all {} rows", R::TABLE);

        let sql = select_all_sql::<R>();
        let rows = sqlx::query_as::<_, R>(&sql)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows)
    }

    // =========================================================================
    // Batch operations
    // =========================================================================

    /// Persists records in chunks, one transaction per chunk.
    ///
    /// Returns the number of rows inserted.
    pub async fn store_batch<R: Record>(&self, records: &[R]) -> DocstoreResult<u64> {
        if records.is_empty() {
            return Err(DocstoreError::validation("record list cannot be empty"));
        }
        debug!(
            "Batch storing {} {} rows (chunk size {})",
            records.len(),
            R::TABLE,
            self.batch_size
        );

        let sql = insert_sql::<R>();
        let mut inserted = 0u64;
        for chunk in records.chunks(self.batch_size) {
            let mut tx = self.pool.inner().begin().await?;
            for record in chunk {
                let result = bind_params(sqlx::query(&sql), &record.values())
                    .execute(&mut *tx)
                    .await?;
                inserted += result.rows_affected();
            }
            tx.commit().await?;
        }
        Ok(inserted)
    }

    /// Updates records in chunks, one transaction per chunk.
    ///
    /// Returns the number of rows updated.
    pub async fn update_batch<R: Record>(&self, records: &[R]) -> DocstoreResult<u64> {
        if records.is_empty() {
            return Err(DocstoreError::validation("record list cannot be empty"));
        }
        debug!(
            "Batch updating {} {} rows (chunk size {})",
            records.len(),
            R::TABLE,
            self.batch_size
        );

        let sql = update_sql::<R>();
        let mut updated = 0u64;
        for chunk in records.chunks(self.batch_size) {
            let mut tx = self.pool.inner().begin().await?;
            for record in chunk {
                let id = record.id().ok_or_else(|| {
                    DocstoreError::validation(format!("{} record has no identifier", R::TABLE))
                })?;
                let mut params = record.values();
                params.push(id.into());
                let result = bind_params(sqlx::query(&sql), &params)
                    .execute(&mut *tx)
                    .await?;
                updated += result.rows_affected();
            }
            tx.commit().await?;
        }
        Ok(updated)
    }

    // =========================================================================
    // Named queries
    // =========================================================================

    /// Retrieves typed rows via a named query, with positional parameters
    /// and an optional result window.
    pub async fn find_named<R>(
        &self,
        name: &str,
        params: &[Param],
        window: Window,
    ) -> DocstoreResult<Vec<R>>
    where
        R: for<'r> sqlx::FromRow<'r, sqlx::mysql::MySqlRow> + Send + Unpin,
    {
        debug!("Executing named query {}", name);

        let sql = format!("{}{}", self.catalog.get(name)?, window.clause());
        let rows = bind_params_as(sqlx::query_as::<_, R>(&sql), params)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows)
    }

    /// Retrieves typed rows via a named query whose `{in}` placeholder is
    /// expanded to a positional IN-list over the parameters.
    pub async fn find_named_in<R>(
        &self,
        name: &str,
        params: &[Param],
        window: Window,
    ) -> DocstoreResult<Vec<R>>
    where
        R: for<'r> sqlx::FromRow<'r, sqlx::mysql::MySqlRow> + Send + Unpin,
    {
        debug!("Executing named IN query {}", name);

        let expanded = expand_in_placeholder(self.catalog.get(name)?, params.len())?;
        let sql = format!("{}{}", expanded, window.clause());
        let rows = bind_params_as(sqlx::query_as::<_, R>(&sql), params)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows)
    }

    /// Fetches a single scalar count via a named query.
    pub async fn count_named(&self, name: &str, params: &[Param]) -> DocstoreResult<i64> {
        debug!("Executing named count query {}", name);

        let sql = self.catalog.get(name)?;
        let count = bind_params_scalar(sqlx::query_scalar::<_, i64>(sql), params)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count)
    }

    /// Executes a named INSERT/UPDATE/DELETE statement.
    ///
    /// Returns the number of affected rows.
    pub async fn execute_named(&self, name: &str, params: &[Param]) -> DocstoreResult<u64> {
        debug!("Executing named update {}", name);

        let sql = self.catalog.get(name)?;
        let result = bind_params(sqlx::query(sql), params)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    /// Executes a named statement once per parameter set, committing every
    /// [`Self::batch_size`] executions.
    ///
    /// Returns the total number of affected rows.
    pub async fn execute_named_batch(
        &self,
        name: &str,
        param_sets: &[Vec<Param>],
    ) -> DocstoreResult<u64> {
        if param_sets.is_empty() {
            return Err(DocstoreError::validation("parameter sets cannot be empty"));
        }
        debug!(
            "Batch executing named update {} for {} parameter sets",
            name,
            param_sets.len()
        );

        let sql = self.catalog.get(name)?;
        let mut affected = 0u64;
        for chunk in param_sets.chunks(self.batch_size) {
            let mut tx = self.pool.inner().begin().await?;
            for params in chunk {
                let result = bind_params(sqlx::query(sql), params)
                    .execute(&mut *tx)
                    .await?;
                affected += result.rows_affected();
            }
            tx.commit().await?;
        }
        Ok(affected)
    }

    // =========================================================================
    // Native SQL
    // =========================================================================

    /// Retrieves typed rows from an ad-hoc SQL statement.
    pub async fn find_sql<R>(
        &self,
        sql: &str,
        params: &[Param],
        window: Window,
    ) -> DocstoreResult<Vec<R>>
    where
        R: for<'r> sqlx::FromRow<'r, sqlx::mysql::MySqlRow> + Send + Unpin,
    {
        debug!("Executing native query");

        let windowed = format!("{}{}", sql, window.clause());
        let rows = bind_params_as(sqlx::query_as::<_, R>(&windowed), params)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows)
    }

    /// Fetches a single scalar count from an ad-hoc SQL statement.
    pub async fn count_sql(&self, sql: &str, params: &[Param]) -> DocstoreResult<i64> {
        debug!("Executing native count query");

        let count = bind_params_scalar(sqlx::query_scalar::<_, i64>(sql), params)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count)
    }

    /// Executes an ad-hoc INSERT/UPDATE/DELETE statement.
    ///
    /// Returns the number of affected rows.
    pub async fn execute_sql(&self, sql: &str, params: &[Param]) -> DocstoreResult<u64> {
        debug!("Executing native update");

        let result = bind_params(sqlx::query(sql), params)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }
}

impl std::fmt::Debug for GenericDao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericDao")
            .field("batch_size", &self.batch_size)
            .field("queries", &self.catalog.len())
            .finish_non_exhaustive()
    }
}
