//! [`SqliteStore`] — the SQLite implementation of [`FeedbackStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use chorus_core::{
  feedback::{Feedback, FeedbackStatus, NewFeedback},
  filter::FeedbackFilter,
  location::{NewStore, Store},
  store::FeedbackStore,
};

use crate::{
  Result,
  encode::{FEEDBACK_COLUMNS, RawFeedback, encode_dt, store_from_row},
  query::FeedbackQuery,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Chorus store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema ready");
    Ok(())
  }

  /// Insert a feedback row stamped with `timestamp`.
  pub(crate) async fn insert_feedback_at(
    &self,
    input: NewFeedback,
    timestamp: DateTime<Utc>,
  ) -> Result<Feedback> {
    let ts_str        = encode_dt(timestamp);
    let category_str  = input.category.as_str();
    let sentiment_str = input.sentiment.as_str();
    let status_str    = FeedbackStatus::New.as_str();
    let platform      = input.platform.clone();
    let text          = input.text.clone();
    let score         = input.sentiment_score;
    let store_id      = input.store_id;

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO feedback (
             platform, text, timestamp, category, sentiment,
             sentiment_score, store_id, status
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            platform,
            text,
            ts_str,
            category_str,
            sentiment_str,
            score,
            store_id,
            status_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Feedback {
      id,
      platform: input.platform,
      text: input.text,
      timestamp,
      category: input.category,
      sentiment: input.sentiment,
      sentiment_score: input.sentiment_score,
      store_id: input.store_id,
      status: FeedbackStatus::New,
    })
  }
}

// ─── FeedbackStore impl ──────────────────────────────────────────────────────

impl FeedbackStore for SqliteStore {
  type Error = crate::Error;

  // ── Stores ────────────────────────────────────────────────────────────────

  async fn add_store(&self, input: NewStore) -> Result<Store> {
    let name = input.name.clone();
    let area = input.area.clone();

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO stores (name, area) VALUES (?1, ?2)",
          rusqlite::params![name, area],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Store { id, name: input.name, area: input.area })
  }

  async fn list_stores(&self, area: Option<String>) -> Result<Vec<Store>> {
    let stores = self
      .conn
      .call(move |conn| {
        let rows = if let Some(a) = area {
          let mut stmt = conn.prepare(
            "SELECT id, name, area FROM stores WHERE area = ?1 ORDER BY id",
          )?;
          stmt
            .query_map(rusqlite::params![a], store_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt =
            conn.prepare("SELECT id, name, area FROM stores ORDER BY id")?;
          stmt
            .query_map([], store_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;
    Ok(stores)
  }

  async fn list_areas(&self) -> Result<Vec<String>> {
    let areas = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT area FROM stores
           WHERE area IS NOT NULL
           ORDER BY area",
        )?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(areas)
  }

  // ── Feedback ──────────────────────────────────────────────────────────────

  async fn record_feedback(&self, input: NewFeedback) -> Result<Feedback> {
    self.insert_feedback_at(input, Utc::now()).await
  }

  async fn get_feedback(&self, id: i64) -> Result<Option<Feedback>> {
    let raw: Option<RawFeedback> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {FEEDBACK_COLUMNS} FROM feedback f WHERE f.id = ?1"),
            rusqlite::params![id],
            RawFeedback::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawFeedback::into_feedback).transpose()
  }

  async fn resolve_feedback(&self, id: i64) -> Result<Option<Feedback>> {
    let raw: Option<RawFeedback> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE feedback SET status = ?1 WHERE id = ?2",
          rusqlite::params![FeedbackStatus::Resolved.as_str(), id],
        )?;
        let raw = if changed == 0 {
          None
        } else {
          Some(tx.query_row(
            &format!("SELECT {FEEDBACK_COLUMNS} FROM feedback f WHERE f.id = ?1"),
            rusqlite::params![id],
            RawFeedback::from_row,
          )?)
        };
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawFeedback::into_feedback).transpose()
  }

  async fn scan_feedback(&self, filter: &FeedbackFilter) -> Result<Vec<Feedback>> {
    let FeedbackQuery { sql, params } = FeedbackQuery::scan(filter);

    let raws: Vec<RawFeedback> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawFeedback::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFeedback::into_feedback).collect()
  }
}
