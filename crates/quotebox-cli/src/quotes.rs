//! Quote store and sentiment command handlers.

use std::path::Path;

use quotebox_core::{AppConfig, QuoteInput};
use quotebox_db::{QuoteLookup, QuoteRow};
use sqlx::SqlitePool;

async fn open_store(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let pool_config = quotebox_db::PoolConfig::from_app_config(config);
    Ok(quotebox_db::initialize(&config.database_url, pool_config).await?)
}

pub(crate) async fn run_init(config: &AppConfig) -> anyhow::Result<()> {
    let pool = open_store(config).await?;
    println!(
        "quote store ready ({} quotes)",
        quotebox_db::count_quotes(&pool).await
    );
    pool.close().await;
    Ok(())
}

pub(crate) async fn run_add(config: &AppConfig, text: String) -> anyhow::Result<()> {
    let pool = open_store(config).await?;
    let result = quotebox_db::write_quotes(&pool, &QuoteInput::single(text)).await;
    pool.close().await;

    let written = result?;
    println!("wrote {written} quote");
    Ok(())
}

/// Import a whole file as one batch: either every quote is stored or none.
///
/// # Errors
///
/// Returns an error if the file cannot be read, its contents are not a valid
/// quote payload, or the batch write fails.
pub(crate) async fn run_import(config: &AppConfig, file: &Path, lines: bool) -> anyhow::Result<()> {
    let contents = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    let input = parse_import(&contents, lines)?;
    tracing::debug!(count = input.len(), lines, file = %file.display(), "parsed import file");

    let pool = open_store(config).await?;
    let result = quotebox_db::write_quotes(&pool, &input).await;
    pool.close().await;

    let written = result?;
    println!("imported {written} quotes from {}", file.display());
    Ok(())
}

pub(crate) async fn run_list(config: &AppConfig) -> anyhow::Result<()> {
    let pool = open_store(config).await?;
    let rows = quotebox_db::read_all_quotes(&pool).await;
    pool.close().await;

    if rows.is_empty() {
        println!("no quotes stored; run `add` or `import` first");
        return Ok(());
    }

    println!("{:<8}TEXT", "ID");
    for row in &rows {
        println!("{:<8}{}", row.id, row.text);
    }
    Ok(())
}

pub(crate) async fn run_get(config: &AppConfig, id: i64, score: bool) -> anyhow::Result<()> {
    let pool = open_store(config).await?;
    let lookup = quotebox_db::read_quote_by_id(&pool, id).await;
    pool.close().await;

    match lookup {
        QuoteLookup::Found(row) => print_quote(&row, score),
        QuoteLookup::NotFound => println!("quote {id} not found"),
        QuoteLookup::Unavailable => anyhow::bail!("quote {id} could not be read from the store"),
    }
    Ok(())
}

pub(crate) async fn run_random(config: &AppConfig, score: bool) -> anyhow::Result<()> {
    let pool = open_store(config).await?;
    let row = quotebox_db::read_random_quote(&pool).await;
    pool.close().await;

    match row {
        Some(row) => print_quote(&row, score),
        None => println!("no quotes stored; run `add` or `import` first"),
    }
    Ok(())
}

pub(crate) fn print_sentiment(text: &str) {
    let result = quotebox_sentiment::score(text);
    println!(
        "neg {:.3}  neu {:.3}  pos {:.3}  compound {:.4}  => {}",
        result.scores.neg, result.scores.neu, result.scores.pos, result.scores.compound, result.label
    );
}

fn print_quote(row: &QuoteRow, score: bool) {
    println!("#{} {}", row.id, row.text);
    if score {
        print_sentiment(&row.text);
    }
}

/// Turn import file contents into a write input.
///
/// With `lines`, every non-blank line is one quote. Otherwise the contents
/// must be JSON in the same shape the HTTP API accepts.
pub(crate) fn parse_import(contents: &str, lines: bool) -> anyhow::Result<QuoteInput> {
    if lines {
        return Ok(QuoteInput::batch(
            contents.lines().filter(|line| !line.trim().is_empty()),
        ));
    }

    let value: serde_json::Value = serde_json::from_str(contents)
        .map_err(|e| anyhow::anyhow!("import file is not valid JSON: {e}"))?;
    Ok(QuoteInput::from_json(value)?)
}
