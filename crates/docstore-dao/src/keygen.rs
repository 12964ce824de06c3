//! Multi-series hi/lo unique-ID generation from a shared counter table.
//!
//! Identifiers are allocated in windows: one counter round-trip yields
//! `max_lo + 1` consecutive IDs (`id = hi * (max_lo + 1) + lo`), so most
//! allocations are served from memory. The counter row is locked with
//! `SELECT ... FOR UPDATE` while it is read and advanced.

use crate::DatabasePoolInterface;
use docstore_core::validation::rules::valid_identifier;
use docstore_core::{DocstoreError, DocstoreResult};
use docstore_config::KeygenConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Default number of low values per counter round-trip.
pub const DEFAULT_MAX_LO: i64 = 50;

/// One ID series: a named row in a counter table.
///
/// Table and column names are interpolated into SQL and are validated as
/// plain identifiers before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySeries {
    /// Group key identifying the series row.
    pub group: String,
    /// Counter table name.
    pub table: String,
    /// Column holding the group key.
    pub key_column: String,
    /// Column holding the current counter value.
    pub value_column: String,
    /// Number of low values allocated per round-trip.
    pub max_lo: i64,
}

impl KeySeries {
    /// Creates a series with the default counter table layout.
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self::from_config(&KeygenConfig::default(), group)
    }

    /// Creates a series from keygen configuration.
    #[must_use]
    pub fn from_config(config: &KeygenConfig, group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            table: config.table.clone(),
            key_column: config.key_column.clone(),
            value_column: config.value_column.clone(),
            max_lo: config.max_lo,
        }
    }

    /// Overrides the counter table name.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Overrides the key and value column names.
    #[must_use]
    pub fn with_columns(
        mut self,
        key_column: impl Into<String>,
        value_column: impl Into<String>,
    ) -> Self {
        self.key_column = key_column.into();
        self.value_column = value_column.into();
        self
    }

    /// Overrides the allocation window size.
    #[must_use]
    pub const fn with_max_lo(mut self, max_lo: i64) -> Self {
        self.max_lo = max_lo;
        self
    }

    fn validate(&self) -> DocstoreResult<()> {
        if self.group.trim().is_empty() {
            return Err(DocstoreError::validation("series group cannot be blank"));
        }
        for (label, name) in [
            ("table", &self.table),
            ("key column", &self.key_column),
            ("value column", &self.value_column),
        ] {
            valid_identifier(name).map_err(|_| {
                DocstoreError::validation(format!(
                    "series {} is not a valid SQL identifier: {}",
                    label, name
                ))
            })?;
        }
        Ok(())
    }

    fn state_key(&self) -> String {
        format!("{}/{}", self.table, self.group)
    }
}

/// In-memory hi/lo window for one series.
#[derive(Debug)]
struct HiLoSequence {
    hi: i64,
    lo: i64,
    max_lo: i64,
}

impl HiLoSequence {
    /// A sequence that must be refilled before it can yield.
    fn exhausted(max_lo: i64) -> Self {
        Self {
            hi: 0,
            lo: max_lo + 1,
            max_lo,
        }
    }

    /// Installs a freshly fetched hi value. The very first window skips
    /// zero so that generated IDs start at 1.
    fn refill(&mut self, hi: i64) {
        self.hi = hi;
        self.lo = i64::from(hi == 0);
    }

    /// The next ID in the current window, or `None` when exhausted.
    fn next(&mut self) -> Option<i64> {
        if self.lo > self.max_lo {
            return None;
        }
        let id = self.hi * (self.max_lo + 1) + self.lo;
        self.lo += 1;
        Some(id)
    }
}

/// Hi/lo ID generator over a shared counter table.
///
/// One generator serves any number of series; per-series window state is
/// keyed by table and group.
pub struct HiLoKeyGenerator {
    pool: Arc<dyn DatabasePoolInterface>,
    state: Mutex<HashMap<String, Arc<Mutex<HiLoSequence>>>>,
}

impl HiLoKeyGenerator {
    /// Creates a new generator over the given pool.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self {
            pool,
            state: Mutex::new(HashMap::new()),
        }
    }

    /// Allocates the next unique ID for the series.
    ///
    /// With `max_lo < 1` the hi/lo windowing degenerates to one counter
    /// round-trip per ID.
    pub async fn next_id(&self, series: &KeySeries) -> DocstoreResult<i64> {
        series.validate()?;

        if series.max_lo < 1 {
            // Counter values below one are skipped so that the first ID is
            // 1, matching the windowed path, which never yields zero.
            loop {
                let value = self.fetch_and_increment(series).await?;
                if value >= 1 {
                    return Ok(value);
                }
            }
        }

        let sequence = self.series_state(series).await;
        let mut sequence = sequence.lock().await;

        if sequence.max_lo != series.max_lo {
            return Err(DocstoreError::key_generation(format!(
                "series {} already active with max_lo {}",
                series.group, sequence.max_lo
            )));
        }

        if let Some(id) = sequence.next() {
            return Ok(id);
        }

        let hi = self.fetch_and_increment(series).await?;
        debug!("Refilled hi/lo window for {}: hi={}", series.group, hi);
        sequence.refill(hi);
        sequence
            .next()
            .ok_or_else(|| DocstoreError::key_generation("empty window after refill"))
    }

    /// Looks up or creates the window state for a series.
    ///
    /// The registry lock is released before any database work, so a slow
    /// counter refill of one series never blocks allocation for another.
    async fn series_state(&self, series: &KeySeries) -> Arc<Mutex<HiLoSequence>> {
        let mut state = self.state.lock().await;
        Arc::clone(
            state
                .entry(series.state_key())
                .or_insert_with(|| Arc::new(Mutex::new(HiLoSequence::exhausted(series.max_lo)))),
        )
    }

    /// Reads and advances the counter row inside a transaction, inserting
    /// the row at zero when the series does not exist yet.
    async fn fetch_and_increment(&self, series: &KeySeries) -> DocstoreResult<i64> {
        let mut tx = self.pool.inner().begin().await?;

        let select = format!(
            "SELECT {} FROM {} WHERE {} = ? FOR UPDATE",
            series.value_column, series.table, series.key_column
        );
        let current: Option<i64> = sqlx::query_scalar(&select)
            .bind(&series.group)
            .fetch_optional(&mut *tx)
            .await?;

        let value = match current {
            Some(value) => {
                let update = format!(
                    "UPDATE {} SET {} = ? WHERE {} = ?",
                    series.table, series.value_column, series.key_column
                );
                sqlx::query(&update)
                    .bind(value + 1)
                    .bind(&series.group)
                    .execute(&mut *tx)
                    .await?;
                value
            }
            None => {
                let insert = format!(
                    "INSERT INTO {} ({}, {}) VALUES (?, ?)",
                    series.table, series.key_column, series.value_column
                );
                sqlx::query(&insert)
                    .bind(&series.group)
                    .bind(1_i64)
                    .execute(&mut *tx)
                    .await?;
                0
            }
        };

        tx.commit().await?;
        Ok(value)
    }
}

impl std::fmt::Debug for HiLoKeyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiLoKeyGenerator").finish_non_exhaustive()
    }
}
