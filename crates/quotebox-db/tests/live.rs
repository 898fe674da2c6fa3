//! Live integration tests for quotebox-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated SQLite database created by the sqlx
//! test harness. The `migrations` path is relative to the crate root
//! (`crates/quotebox-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use std::collections::HashSet;

use quotebox_core::{NewQuote, QuoteInput, EMPTY_TEXT_SENTINEL};
use quotebox_db::{
    count_quotes, initialize, read_all_quotes, read_quote_by_id, read_random_quote, write_quotes,
    DbError, PoolConfig, QuoteLookup,
};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Make any insert of the text `poison` fail inside the engine.
async fn install_poison_trigger(pool: &SqlitePool) {
    sqlx::query(
        "CREATE TRIGGER reject_poison BEFORE INSERT ON quotes \
         WHEN NEW.text = 'poison' \
         BEGIN SELECT RAISE(ABORT, 'poison quote rejected'); END",
    )
    .execute(pool)
    .await
    .expect("create trigger");
}

fn temp_root(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("quotebox-{label}-{}", uuid::Uuid::new_v4()))
}

async fn write_one(pool: &SqlitePool, text: &str) -> i64 {
    write_quotes(pool, &QuoteInput::single(text))
        .await
        .expect("write single quote");
    read_all_quotes(pool)
        .await
        .last()
        .map(|row| row.id)
        .expect("written quote is readable")
}

// ---------------------------------------------------------------------------
// Section 1: Writes and normalization
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn single_write_round_trips_by_id(pool: SqlitePool) {
    let id = write_one(&pool, "The only way out is through.").await;

    let row = read_quote_by_id(&pool, id)
        .await
        .found()
        .expect("quote exists");
    assert_eq!(row.id, id);
    assert_eq!(row.text, "The only way out is through.");
}

#[sqlx::test(migrations = "../../migrations")]
async fn write_trims_surrounding_whitespace(pool: SqlitePool) {
    let id = write_one(&pool, "  Less is more.\n").await;

    let row = read_quote_by_id(&pool, id)
        .await
        .found()
        .expect("quote exists");
    assert_eq!(row.text, "Less is more.");
}

#[sqlx::test(migrations = "../../migrations")]
async fn blank_text_is_stored_as_sentinel(pool: SqlitePool) {
    let input = QuoteInput::Batch(vec![
        NewQuote::new(""),
        NewQuote::new("   \t"),
        NewQuote::default(),
    ]);

    let written = write_quotes(&pool, &input).await.expect("write blanks");
    assert_eq!(written, 3);

    let rows = read_all_quotes(&pool).await;
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.text == EMPTY_TEXT_SENTINEL));
}

#[sqlx::test(migrations = "../../migrations")]
async fn batch_write_returns_count_and_preserves_order(pool: SqlitePool) {
    let written = write_quotes(&pool, &QuoteInput::batch(["one", "two", "three"]))
        .await
        .expect("write batch");
    assert_eq!(written, 3);

    let rows = read_all_quotes(&pool).await;
    let texts: Vec<&str> = rows.iter().map(|row| row.text.as_str()).collect();
    assert_eq!(texts, ["one", "two", "three"]);
    assert!(rows.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[sqlx::test(migrations = "../../migrations")]
async fn empty_batch_writes_nothing(pool: SqlitePool) {
    let written = write_quotes(&pool, &QuoteInput::Batch(Vec::new()))
        .await
        .expect("empty batch is not an error");
    assert_eq!(written, 0);
    assert_eq!(count_quotes(&pool).await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn ids_are_monotonic_across_writes(pool: SqlitePool) {
    let first = write_one(&pool, "first").await;
    let second = write_one(&pool, "second").await;
    assert!(second > first, "expected {second} > {first}");
}

// ---------------------------------------------------------------------------
// Section 2: Atomicity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn failing_batch_item_rolls_back_whole_batch(pool: SqlitePool) {
    install_poison_trigger(&pool).await;

    let result = write_quotes(
        &pool,
        &QuoteInput::batch(["alpha", "beta", "poison", "delta"]),
    )
    .await;

    assert!(
        matches!(result, Err(DbError::Write(_))),
        "expected DbError::Write, got: {result:?}"
    );
    assert!(read_all_quotes(&pool).await.is_empty());
    assert_eq!(count_quotes(&pool).await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn failed_batch_leaves_earlier_writes_intact(pool: SqlitePool) {
    write_one(&pool, "kept").await;
    install_poison_trigger(&pool).await;

    let result = write_quotes(&pool, &QuoteInput::batch(["lost", "poison"])).await;
    assert!(result.is_err());

    let rows = read_all_quotes(&pool).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text, "kept");
}

// ---------------------------------------------------------------------------
// Section 3: Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn read_all_on_empty_store_is_empty(pool: SqlitePool) {
    assert!(read_all_quotes(&pool).await.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn read_by_missing_id_is_none(pool: SqlitePool) {
    write_one(&pool, "present").await;
    assert_eq!(read_quote_by_id(&pool, 9_999).await, QuoteLookup::NotFound);
}

#[sqlx::test(migrations = "../../migrations")]
async fn read_random_on_empty_store_is_none(pool: SqlitePool) {
    assert!(read_random_quote(&pool).await.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn read_random_is_not_fixed_to_one_row(pool: SqlitePool) {
    write_quotes(&pool, &QuoteInput::batch(["a", "b", "c", "d", "e"]))
        .await
        .expect("seed quotes");

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let row = read_random_quote(&pool).await.expect("store is not empty");
        seen.insert(row.id);
        if seen.len() > 1 {
            break;
        }
    }
    assert!(seen.len() > 1, "random read always returned {seen:?}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn blank_rows_inserted_out_of_band_read_back_as_sentinel(pool: SqlitePool) {
    sqlx::query("INSERT INTO quotes (text) VALUES ('   ')")
        .execute(&pool)
        .await
        .expect("raw insert");

    let rows = read_all_quotes(&pool).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text, EMPTY_TEXT_SENTINEL);
}

// ---------------------------------------------------------------------------
// Section 4: Failure policy
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn reads_degrade_when_storage_fails(pool: SqlitePool) {
    write_one(&pool, "soon unreachable").await;
    sqlx::query("DROP TABLE quotes")
        .execute(&pool)
        .await
        .expect("drop table");

    assert!(read_all_quotes(&pool).await.is_empty());
    assert_eq!(read_quote_by_id(&pool, 1).await, QuoteLookup::Unavailable);
    assert!(read_random_quote(&pool).await.is_none());
    assert_eq!(count_quotes(&pool).await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn writes_propagate_when_storage_fails(pool: SqlitePool) {
    sqlx::query("DROP TABLE quotes")
        .execute(&pool)
        .await
        .expect("drop table");

    let result = write_quotes(&pool, &QuoteInput::single("nowhere to go")).await;
    assert!(
        matches!(result, Err(DbError::Write(_))),
        "expected DbError::Write, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Section 5: Initialization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn initialize_is_idempotent_and_keeps_data() {
    let root = temp_root("init");
    let db_path = root.join("data").join("quotes.sqlite");
    let url = format!("sqlite://{}", db_path.display());

    let pool = initialize(&url, PoolConfig::default())
        .await
        .expect("first initialize");
    assert!(db_path.exists(), "database file should be created");
    write_quotes(&pool, &QuoteInput::single("survives restarts"))
        .await
        .expect("write");
    pool.close().await;

    let pool = initialize(&url, PoolConfig::default())
        .await
        .expect("second initialize");
    let rows = read_all_quotes(&pool).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text, "survives restarts");
    pool.close().await;

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn initialize_reports_unusable_location() {
    let root = temp_root("blocked");
    std::fs::create_dir_all(&root).expect("create temp root");
    let blocker = root.join("blocker");
    std::fs::write(&blocker, b"not a directory").expect("write blocker file");
    let url = format!("sqlite://{}", blocker.join("data").join("quotes.sqlite").display());

    let result = initialize(&url, PoolConfig::default()).await;
    assert!(
        matches!(result, Err(DbError::Io(_))),
        "expected DbError::Io, got: {result:?}"
    );

    let _ = std::fs::remove_dir_all(&root);
}

// ---------------------------------------------------------------------------
// Section 6: Concurrent access
// ---------------------------------------------------------------------------

const WRITERS: u64 = 40;
const BATCH_SIZE: u64 = 20;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_batches_and_reads_on_file_store() {
    let root = temp_root("concurrent");
    let url = format!("sqlite://{}", root.join("quotes.sqlite").display());
    let pool = initialize(&url, PoolConfig::default())
        .await
        .expect("initialize");

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let pool = pool.clone();
            tokio::spawn(async move {
                let batch =
                    QuoteInput::batch((0..BATCH_SIZE).map(|i| format!("writer {writer} quote {i}")));
                let written = write_quotes(&pool, &batch).await;
                let seen = read_all_quotes(&pool).await.len();
                (written, seen)
            })
        })
        .collect();

    for handle in handles {
        let (written, seen) = handle.await.expect("writer task");
        assert_eq!(written.expect("concurrent batch write"), BATCH_SIZE);
        let seen = u64::try_from(seen).expect("row count fits u64");
        // Readers only ever observe whole batches, including their own.
        assert!(seen >= BATCH_SIZE, "saw {seen} rows after own commit");
        assert_eq!(seen % BATCH_SIZE, 0, "saw a partial batch: {seen} rows");
    }

    assert_eq!(count_quotes(&pool).await, WRITERS * BATCH_SIZE);
    let ids: HashSet<i64> = read_all_quotes(&pool)
        .await
        .into_iter()
        .map(|row| row.id)
        .collect();
    assert_eq!(
        u64::try_from(ids.len()).expect("id count fits u64"),
        WRITERS * BATCH_SIZE
    );

    pool.close().await;
    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writes_share_one_in_memory_store() {
    let config = PoolConfig {
        max_connections: 5,
        ..PoolConfig::default()
    };
    let pool = initialize("sqlite::memory:", config)
        .await
        .expect("initialize in-memory store");

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let pool = pool.clone();
            tokio::spawn(async move {
                write_quotes(&pool, &QuoteInput::single(format!("in memory {i}"))).await
            })
        })
        .collect();

    for handle in handles {
        let written = handle.await.expect("writer task");
        assert_eq!(written.expect("in-memory write"), 1);
    }

    // Every pooled connection sees the same database, not a private copy.
    assert_eq!(count_quotes(&pool).await, 10);
    assert_eq!(read_all_quotes(&pool).await.len(), 10);
    pool.close().await;
}
