use {
    crate::{
        domain::TradingDayIndex,
        models::DailyBar,
        utils::{STANDARD_DATE_FORMAT, normalize_trade_date},
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    sqlx::{
        Pool, QueryBuilder, Row, Sqlite,
        sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    },
    std::{path::Path, str::FromStr, time::Duration},
};

/// Read/write contract over the locally owned daily-bar history.
///
/// Reads normalize legacy trade-date formats; rows whose dates cannot be
/// normalized are skipped rather than poisoning the data set.
#[async_trait]
pub trait BarStore: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn upsert_bars(&self, symbol: &str, bars: &[DailyBar]) -> Result<u64>;
    /// Most recent `limit` bars, returned oldest to newest.
    async fn load_recent(&self, symbol: &str, limit: u32) -> Result<Vec<DailyBar>>;
    /// Full ascending trading-day index with close lookup.
    async fn load_trading_index(&self, symbol: &str) -> Result<TradingDayIndex>;
    async fn has_min_history(&self, symbol: &str, min_rows: u32) -> Result<bool>;
}

pub struct SqliteBarStore {
    pool: Pool<Sqlite>,
}

impl SqliteBarStore {
    pub async fn new(db_path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let connection_options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10))
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .connect_with(connection_options)
            .await
            .with_context(|| format!("connecting to underlying DB at {db_path}"))?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// In-memory database. Single connection: each SQLite memory connection
    /// is its own database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?;
        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }
}

#[async_trait]
impl BarStore for SqliteBarStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS underlying_daily (
                trade_date TEXT NOT NULL,
                symbol TEXT NOT NULL,
                close REAL NOT NULL,
                volume INTEGER NOT NULL,
                PRIMARY KEY (trade_date, symbol)
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("creating underlying_daily table")?;

        Ok(())
    }

    async fn upsert_bars(&self, symbol: &str, bars: &[DailyBar]) -> Result<u64> {
        if bars.is_empty() {
            return Ok(0);
        }
        let symbol = symbol.to_uppercase();

        let mut written = 0u64;
        for chunk in bars.chunks(3000) {
            let mut query_builder =
                QueryBuilder::new("INSERT INTO underlying_daily (trade_date, symbol, close, volume) ");

            query_builder.push_values(chunk, |mut b, bar| {
                b.push_bind(bar.date.format(STANDARD_DATE_FORMAT).to_string())
                    .push_bind(&symbol)
                    .push_bind(bar.close)
                    .push_bind(bar.volume);
            });
            query_builder.push(
                " ON CONFLICT(trade_date, symbol) DO UPDATE SET \
                 close = excluded.close, volume = excluded.volume",
            );

            query_builder.build().execute(&self.pool).await?;
            written += chunk.len() as u64;
        }

        Ok(written)
    }

    async fn load_recent(&self, symbol: &str, limit: u32) -> Result<Vec<DailyBar>> {
        let rows = sqlx::query(
            r#"
            SELECT trade_date, close, volume
            FROM underlying_daily
            WHERE symbol = ?
            ORDER BY trade_date DESC
            LIMIT ?
            "#,
        )
        .bind(symbol.to_uppercase())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut bars: Vec<DailyBar> = rows
            .iter()
            .filter_map(|row| {
                let raw: String = row.get("trade_date");
                let date = normalize_trade_date(&raw)?;
                Some(DailyBar {
                    date,
                    close: row.get("close"),
                    volume: row.get("volume"),
                })
            })
            .collect();

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    async fn load_trading_index(&self, symbol: &str) -> Result<TradingDayIndex> {
        let rows = sqlx::query(
            r#"
            SELECT trade_date, close
            FROM underlying_daily
            WHERE symbol = ?
            ORDER BY trade_date ASC
            "#,
        )
        .bind(symbol.to_uppercase())
        .fetch_all(&self.pool)
        .await?;

        Ok(TradingDayIndex::from_closes(rows.iter().filter_map(
            |row| {
                let raw: String = row.get("trade_date");
                let date = normalize_trade_date(&raw)?;
                Some((date, row.get::<f64, _>("close")))
            },
        )))
    }

    async fn has_min_history(&self, symbol: &str, min_rows: u32) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(1) AS n FROM underlying_daily WHERE symbol = ?")
            .bind(symbol.to_uppercase())
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.get("n");
        Ok(n >= min_rows as i64)
    }
}
