use {
    crate::{models::SkewRow, utils::parse_packed_ymd},
    anyhow::{Context, Result},
    async_trait::async_trait,
    sqlx::{
        Pool, Row, Sqlite,
        sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    },
    std::{str::FromStr, time::Duration},
};

/// Read contract over the skew snapshot database. The collector that fills
/// it runs elsewhere; a path with no database yet opens as an empty
/// snapshot rather than failing the run.
#[async_trait]
pub trait SkewStore: Send + Sync {
    async fn latest_trade_date(&self, symbol: &str) -> Result<Option<String>>;
    /// All usable ATM rows for one (symbol, trade date) snapshot.
    async fn load_rows(&self, symbol: &str, trade_date: &str) -> Result<Vec<SkewRow>>;
}

pub struct SqliteSkewStore {
    pool: Pool<Sqlite>,
}

impl SqliteSkewStore {
    pub async fn new(db_path: &str) -> Result<Self> {
        let connection_options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10))
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .connect_with(connection_options)
            .await
            .with_context(|| format!("connecting to skew DB at {db_path}"))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS skew_daily (
                trade_date TEXT NOT NULL,
                symbol TEXT NOT NULL,
                expiry TEXT NOT NULL,
                dte INTEGER NOT NULL,
                spot REAL,
                atm_strike REAL,
                atm_iv REAL,
                PRIMARY KEY (trade_date, symbol, expiry)
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("creating skew_daily table")?;
        Ok(())
    }

    pub async fn insert_row(&self, row: &SkewRow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO skew_daily
            (trade_date, symbol, expiry, dte, spot, atm_strike, atm_iv)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.trade_date)
        .bind(row.symbol.to_uppercase())
        .bind(row.expiry.format(crate::utils::PACKED_DATE_FORMAT).to_string())
        .bind(row.dte)
        .bind(row.spot)
        .bind(row.atm_strike)
        .bind(row.atm_iv)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SkewStore for SqliteSkewStore {
    async fn latest_trade_date(&self, symbol: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT MAX(trade_date) AS latest FROM skew_daily WHERE symbol = ?")
            .bind(symbol.to_uppercase())
            .fetch_one(&self.pool)
            .await?;
        let latest: Option<String> = row.get("latest");
        Ok(latest)
    }

    async fn load_rows(&self, symbol: &str, trade_date: &str) -> Result<Vec<SkewRow>> {
        let rows = sqlx::query(
            r#"
            SELECT trade_date, symbol, expiry, dte, spot, atm_strike, atm_iv
            FROM skew_daily
            WHERE symbol = ? AND trade_date = ?
              AND atm_iv IS NOT NULL AND atm_strike IS NOT NULL
            "#,
        )
        .bind(symbol.to_uppercase())
        .bind(trade_date)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let expiry_raw: String = row.get("expiry");
                Ok(SkewRow {
                    trade_date: row.get("trade_date"),
                    symbol: row.get("symbol"),
                    // A malformed expiry would corrupt every downstream
                    // comparison, so this fails rather than skipping.
                    expiry: parse_packed_ymd(&expiry_raw)?,
                    dte: row.get("dte"),
                    spot: row.get("spot"),
                    atm_strike: row.get("atm_strike"),
                    atm_iv: row.get("atm_iv"),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(trade_date: &str, expiry: &str, atm_iv: f64) -> SkewRow {
        SkewRow {
            trade_date: trade_date.into(),
            symbol: "TEST".into(),
            expiry: expiry.parse().unwrap(),
            dte: 30,
            spot: 100.0,
            atm_strike: 100.0,
            atm_iv,
        }
    }

    #[tokio::test]
    async fn latest_trade_date_and_rows() {
        let store = SqliteSkewStore::in_memory().await.unwrap();
        store
            .insert_row(&row("2024-01-02", "2024-02-16", 0.45))
            .await
            .unwrap();
        store
            .insert_row(&row("2024-01-02", "2024-03-15", 0.38))
            .await
            .unwrap();
        store
            .insert_row(&row("2024-01-03", "2024-02-16", 0.47))
            .await
            .unwrap();

        let latest = store.latest_trade_date("TEST").await.unwrap();
        assert_eq!(latest.as_deref(), Some("2024-01-03"));

        let rows = store.load_rows("TEST", "2024-01-02").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| {
            r.expiry == "2024-02-16".parse::<NaiveDate>().unwrap() && r.atm_iv == 0.45
        }));
    }

    #[tokio::test]
    async fn missing_db_file_opens_as_empty_snapshot() {
        let dir = std::env::temp_dir().join("earnings_edge_skew_fresh_test");
        std::fs::create_dir_all(&dir).unwrap();
        let db_path = dir.join("skew_daily.sqlite");
        std::fs::remove_file(&db_path).ok();

        let store = SqliteSkewStore::new(db_path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(store.latest_trade_date("TEST").await.unwrap(), None);

        drop(store);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn empty_symbol_has_no_trade_date() {
        let store = SqliteSkewStore::in_memory().await.unwrap();
        assert_eq!(store.latest_trade_date("NOPE").await.unwrap(), None);
    }

    #[tokio::test]
    async fn null_iv_rows_are_filtered() {
        let store = SqliteSkewStore::in_memory().await.unwrap();
        store
            .insert_row(&row("2024-01-02", "2024-02-16", 0.45))
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO skew_daily (trade_date, symbol, expiry, dte, spot, atm_strike, atm_iv)
             VALUES ('2024-01-02', 'TEST', '20240315', 72, 100.0, NULL, NULL)",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let rows = store.load_rows("TEST", "2024-01-02").await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn malformed_expiry_fails_loudly() {
        let store = SqliteSkewStore::in_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO skew_daily (trade_date, symbol, expiry, dte, spot, atm_strike, atm_iv)
             VALUES ('2024-01-02', 'TEST', 'not-a-date', 30, 100.0, 100.0, 0.4)",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        assert!(store.load_rows("TEST", "2024-01-02").await.is_err());
    }
}
