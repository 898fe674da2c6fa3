//! Database operations for the `quotes` table.

use quotebox_core::{normalize_text, Quote, QuoteInput, EMPTY_TEXT_SENTINEL};
use sqlx::SqlitePool;

use crate::policy::{degrade, propagate, StoreOperation};
use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `quotes` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct QuoteRow {
    pub id: i64,
    pub text: String,
}

impl QuoteRow {
    /// Re-apply write normalization to a row read back from storage, so rows
    /// inserted outside [`write_quotes`] still honour the sentinel rule.
    fn normalized(self) -> Self {
        Self {
            id: self.id,
            text: normalize_text(&self.text),
        }
    }
}

/// Outcome of a read by id.
///
/// Keeps an absent id apart from a store that could not be read, without
/// handing the storage error itself to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuoteLookup {
    Found(QuoteRow),
    NotFound,
    /// The read failed; the error was logged and degraded to this variant.
    #[default]
    Unavailable,
}

impl QuoteLookup {
    /// The row when found; `None` for both a miss and an unavailable store.
    #[must_use]
    pub fn found(self) -> Option<QuoteRow> {
        match self {
            Self::Found(row) => Some(row),
            Self::NotFound | Self::Unavailable => None,
        }
    }
}

impl From<Option<QuoteRow>> for QuoteLookup {
    fn from(row: Option<QuoteRow>) -> Self {
        row.map_or(Self::NotFound, |row| Self::Found(row.normalized()))
    }
}

impl From<QuoteRow> for Quote {
    fn from(row: QuoteRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
        }
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert every quote in `input` as one atomic unit and return how many rows
/// were written.
///
/// Text is trimmed and blank text is stored as [`EMPTY_TEXT_SENTINEL`]. If any
/// insert fails the whole call is rolled back: no quote from `input` survives.
/// An empty batch commits nothing and returns `0`.
///
/// # Errors
///
/// Returns [`DbError::Write`] if the transaction cannot be started, any insert
/// fails, or the commit fails.
pub async fn write_quotes(pool: &SqlitePool, input: &QuoteInput) -> Result<u64, DbError> {
    let result = insert_all(pool, input).await.map_err(DbError::Write);
    let written = propagate(StoreOperation::Write, result)?;

    tracing::info!(
        written,
        batch = matches!(input, QuoteInput::Batch(_)),
        "quotes written"
    );
    Ok(written)
}

async fn insert_all(pool: &SqlitePool, input: &QuoteInput) -> Result<u64, sqlx::Error> {
    // An early return drops `tx` uncommitted, which rolls it back.
    let mut tx = pool.begin().await?;
    let mut written = 0u64;

    for (index, quote) in input.items().iter().enumerate() {
        if quote.is_blank() {
            tracing::warn!(index, sentinel = EMPTY_TEXT_SENTINEL, "blank quote text replaced");
        }

        sqlx::query("INSERT INTO quotes (text) VALUES (?)")
            .bind(quote.normalized_text())
            .execute(&mut *tx)
            .await?;
        written += 1;
    }

    tx.commit().await?;
    Ok(written)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Return every quote ordered by `id` ascending.
///
/// Never fails: an empty store and a storage error both yield an empty `Vec`.
pub async fn read_all_quotes(pool: &SqlitePool) -> Vec<QuoteRow> {
    let result = sqlx::query_as::<_, QuoteRow>("SELECT id, text FROM quotes ORDER BY id ASC")
        .fetch_all(pool)
        .await;

    degrade(StoreOperation::ReadAll, result)
        .into_iter()
        .map(QuoteRow::normalized)
        .collect()
}

/// Look up the quote with the given `id`.
///
/// Never fails: an absent id is [`QuoteLookup::NotFound`] and a storage error
/// is logged and reported as [`QuoteLookup::Unavailable`].
pub async fn read_quote_by_id(pool: &SqlitePool, id: i64) -> QuoteLookup {
    let result = sqlx::query_as::<_, QuoteRow>("SELECT id, text FROM quotes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await;

    degrade(StoreOperation::ReadById, result.map(QuoteLookup::from))
}

/// Return one uniformly chosen quote, or `None` if the store is empty.
///
/// Storage errors are logged and also reported as `None`.
pub async fn read_random_quote(pool: &SqlitePool) -> Option<QuoteRow> {
    let result =
        sqlx::query_as::<_, QuoteRow>("SELECT id, text FROM quotes ORDER BY RANDOM() LIMIT 1")
            .fetch_optional(pool)
            .await;

    degrade(StoreOperation::ReadRandom, result).map(QuoteRow::normalized)
}

/// Number of stored quotes; `0` when the count cannot be read.
pub async fn count_quotes(pool: &SqlitePool) -> u64 {
    let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quotes")
        .fetch_one(pool)
        .await;

    u64::try_from(degrade(StoreOperation::Count, result)).unwrap_or(0)
}
