//! Compiles a [`FeedbackFilter`] into SQL.

use chorus_core::filter::FeedbackFilter;
use rusqlite::types::Value;

use crate::encode::{FEEDBACK_COLUMNS, encode_dt};

/// A `SELECT` over `feedback f` with its positional parameters.
#[derive(Debug)]
pub struct FeedbackQuery {
  pub sql:    String,
  pub params: Vec<Value>,
}

impl FeedbackQuery {
  /// Every row matching `filter`, newest first.
  pub fn scan(filter: &FeedbackFilter) -> Self {
    let mut conds: Vec<&'static str> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(from) = filter.from {
      conds.push("f.timestamp >= ?");
      params.push(Value::Text(encode_dt(from)));
    }
    if let Some(until) = filter.until {
      conds.push("f.timestamp < ?");
      params.push(Value::Text(encode_dt(until)));
    }
    if let Some(store_id) = filter.store_id {
      conds.push("f.store_id = ?");
      params.push(Value::Integer(store_id));
    }
    if let Some(area) = &filter.area {
      conds.push("s.area = ?");
      params.push(Value::Text(area.clone()));
    }
    if let Some(status) = filter.status {
      conds.push("f.status = ?");
      params.push(Value::Text(status.as_str().to_owned()));
    }

    let join = if filter.needs_store_join() {
      "JOIN stores s ON s.id = f.store_id"
    } else {
      ""
    };

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };

    let sql = format!(
      "SELECT {FEEDBACK_COLUMNS}
       FROM feedback f
       {join}
       {where_clause}
       ORDER BY f.timestamp DESC, f.id DESC"
    );

    Self { sql, params }
  }
}
