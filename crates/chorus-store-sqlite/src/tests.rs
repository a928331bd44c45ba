//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Utc};
use chorus_core::{
  category::Category,
  feedback::{FeedbackStatus, NewFeedback},
  filter::{FeedbackFilter, FilterParams},
  location::NewStore,
  metrics,
  sentiment::Sentiment,
  store::FeedbackStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_feedback(text: &str, score: f64, store_id: Option<i64>) -> NewFeedback {
  NewFeedback {
    platform: "web".into(),
    text: text.into(),
    store_id,
    category: Category::Speed,
    sentiment: Sentiment::from_polarity(score),
    sentiment_score: score,
  }
}

fn at(s: &str) -> DateTime<Utc> { s.parse().unwrap() }

fn filter(params: FilterParams) -> FeedbackFilter {
  FeedbackFilter::from_params(&params).unwrap()
}

// ─── Stores ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_stores() {
  let s = store().await;
  let a = s
    .add_store(NewStore { name: "Main St".into(), area: Some("Downtown".into()) })
    .await
    .unwrap();
  let b = s
    .add_store(NewStore { name: "Mall".into(), area: None })
    .await
    .unwrap();
  assert_ne!(a.id, b.id);

  let all = s.list_stores(None).await.unwrap();
  assert_eq!(all, vec![a.clone(), b]);

  let downtown = s.list_stores(Some("Downtown".into())).await.unwrap();
  assert_eq!(downtown, vec![a]);

  assert!(s.list_stores(Some("Uptown".into())).await.unwrap().is_empty());
}

#[tokio::test]
async fn areas_are_distinct_sorted_and_non_null() {
  let s = store().await;
  for (name, area) in [
    ("a", Some("Uptown")),
    ("b", Some("Downtown")),
    ("c", None),
    ("d", Some("Uptown")),
  ] {
    s.add_store(NewStore { name: name.into(), area: area.map(Into::into) })
      .await
      .unwrap();
  }
  assert_eq!(s.list_areas().await.unwrap(), ["Downtown", "Uptown"]);
}

// ─── Feedback recording ──────────────────────────────────────────────────────

#[tokio::test]
async fn record_and_get_feedback() {
  let s = store().await;
  let fb = s
    .record_feedback(new_feedback("slow", -0.3, None))
    .await
    .unwrap();
  assert_eq!(fb.status, FeedbackStatus::New);

  let fetched = s.get_feedback(fb.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, fb.id);
  assert_eq!(fetched.text, "slow");
  assert_eq!(fetched.category, Category::Speed);
  assert_eq!(fetched.sentiment, Sentiment::Negative);
  assert_eq!(fetched.sentiment_score, -0.3);
  assert_eq!(fetched.status, FeedbackStatus::New);
  // Stored with microsecond precision.
  assert_eq!(
    fetched.timestamp.timestamp_micros(),
    fb.timestamp.timestamp_micros()
  );
}

#[tokio::test]
async fn get_feedback_missing_returns_none() {
  let s = store().await;
  assert!(s.get_feedback(999).await.unwrap().is_none());
}

#[tokio::test]
async fn dangling_store_id_is_accepted() {
  let s = store().await;
  let fb = s
    .record_feedback(new_feedback("ok", 0.0, Some(404)))
    .await
    .unwrap();
  let fetched = s.get_feedback(fb.id).await.unwrap().unwrap();
  assert_eq!(fetched.store_id, Some(404));
}

// ─── Resolution ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn resolve_is_idempotent() {
  let s = store().await;
  let fb = s.record_feedback(new_feedback("x", 0.0, None)).await.unwrap();

  let first = s.resolve_feedback(fb.id).await.unwrap().unwrap();
  assert_eq!(first.status, FeedbackStatus::Resolved);

  let second = s.resolve_feedback(fb.id).await.unwrap().unwrap();
  assert_eq!(second.status, FeedbackStatus::Resolved);
  assert_eq!(second, first);
}

#[tokio::test]
async fn resolve_missing_returns_none() {
  let s = store().await;
  assert!(s.resolve_feedback(7).await.unwrap().is_none());
}

// ─── Scanning ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn scan_orders_newest_first() {
  let s = store().await;
  for (text, ts) in [
    ("middle", "2024-01-02T12:00:00Z"),
    ("oldest", "2024-01-01T12:00:00Z"),
    ("newest", "2024-01-03T12:00:00Z"),
  ] {
    s.insert_feedback_at(new_feedback(text, 0.0, None), at(ts))
      .await
      .unwrap();
  }
  let all = s.scan_feedback(&FeedbackFilter::default()).await.unwrap();
  let texts: Vec<_> = all.iter().map(|f| f.text.as_str()).collect();
  assert_eq!(texts, ["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn single_day_range_is_half_open() {
  let s = store().await;
  for ts in [
    "2023-12-31T23:59:59.999999Z",
    "2024-01-01T00:00:00Z",
    "2024-01-01T23:59:59.999999Z",
    "2024-01-02T00:00:00Z",
  ] {
    s.insert_feedback_at(new_feedback(ts, 0.0, None), at(ts))
      .await
      .unwrap();
  }

  let day = filter(FilterParams {
    start: Some("2024-01-01".into()),
    end: Some("2024-01-01".into()),
    ..Default::default()
  });
  let hits = s.scan_feedback(&day).await.unwrap();
  let texts: Vec<_> = hits.iter().map(|f| f.text.as_str()).collect();
  assert_eq!(texts, ["2024-01-01T23:59:59.999999Z", "2024-01-01T00:00:00Z"]);
}

#[tokio::test]
async fn outermost_date_bounds_keep_every_row() {
  let s = store().await;
  s.insert_feedback_at(new_feedback("x", 0.0, None), at("2024-01-01T12:00:00Z"))
    .await
    .unwrap();

  let widest = filter(FilterParams {
    start: Some("0000-01-01".into()),
    end: Some("9999-12-31".into()),
    ..Default::default()
  });
  assert_eq!(s.scan_feedback(&widest).await.unwrap().len(), 1);

  let open_end = filter(FilterParams {
    end: Some("9999-12-31".into()),
    ..Default::default()
  });
  assert_eq!(s.scan_feedback(&open_end).await.unwrap().len(), 1);
}

#[tokio::test]
async fn area_filter_joins_stores() {
  let s = store().await;
  let downtown = s
    .add_store(NewStore { name: "A".into(), area: Some("Downtown".into()) })
    .await
    .unwrap();
  s.record_feedback(new_feedback("linked", 0.5, Some(downtown.id)))
    .await
    .unwrap();
  s.record_feedback(new_feedback("unlinked", 0.5, None))
    .await
    .unwrap();

  let hit = s
    .scan_feedback(&filter(FilterParams {
      area: Some("Downtown".into()),
      ..Default::default()
    }))
    .await
    .unwrap();
  assert_eq!(hit.len(), 1);
  assert_eq!(hit[0].text, "linked");

  let miss = s
    .scan_feedback(&filter(FilterParams {
      area: Some("Uptown".into()),
      ..Default::default()
    }))
    .await
    .unwrap();
  assert!(miss.is_empty());
}

#[tokio::test]
async fn store_and_status_filters_combine() {
  let s = store().await;
  let a = s.record_feedback(new_feedback("a", 0.0, Some(1))).await.unwrap();
  s.record_feedback(new_feedback("b", 0.0, Some(1))).await.unwrap();
  s.record_feedback(new_feedback("c", 0.0, Some(2))).await.unwrap();
  s.resolve_feedback(a.id).await.unwrap();

  let resolved_at_1 = s
    .scan_feedback(&filter(FilterParams {
      store_id: Some("1".into()),
      status: Some("Resolved".into()),
      ..Default::default()
    }))
    .await
    .unwrap();
  assert_eq!(resolved_at_1.len(), 1);
  assert_eq!(resolved_at_1[0].id, a.id);

  let new_at_1 = s
    .scan_feedback(&filter(FilterParams {
      store_id: Some("1".into()),
      status: Some("New".into()),
      ..Default::default()
    }))
    .await
    .unwrap();
  assert_eq!(new_at_1.len(), 1);
  assert_eq!(new_at_1[0].text, "b");
}

#[tokio::test]
async fn same_filter_drives_listing_and_metrics() {
  let s = store().await;
  for (score, ts) in [
    (0.5, "2024-03-01T08:00:00Z"),
    (-0.5, "2024-03-01T18:00:00Z"),
    (0.0, "2024-03-02T08:00:00Z"),
    (0.9, "2024-04-01T08:00:00Z"),
  ] {
    s.insert_feedback_at(new_feedback("x", score, None), at(ts))
      .await
      .unwrap();
  }

  let march = filter(FilterParams {
    start: Some("2024-03-01".into()),
    end: Some("2024-03-31".into()),
    ..Default::default()
  });
  let view = s.scan_feedback(&march).await.unwrap();
  assert_eq!(view.len(), 3);

  let m = metrics::summarize(&view);
  assert_eq!(m.total, 3);
  let speed = m.feedback_by_category[&Category::Speed];
  assert_eq!(speed.count, 3);
  assert_eq!(speed.average_sentiment_score, 0.0);
  for label in Sentiment::ALL {
    assert_eq!(m.feedback_by_sentiment.get(label), 1, "{label:?}");
  }

  let trend = metrics::daily_trend(&view);
  assert_eq!(trend.len(), 2);
  assert_eq!(trend[0].date.to_string(), "2024-03-01");
  assert_eq!(trend[0].average_sentiment_score, 0.0);
  assert_eq!(trend[1].date.to_string(), "2024-03-02");
}
