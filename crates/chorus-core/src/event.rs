//! Change events broadcast to live subscribers after a committed mutation.

use serde::{Deserialize, Serialize};

use crate::feedback::Feedback;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ChangeEvent {
  /// A feedback item was ingested.
  NewFeedback { message: String },
  /// A feedback item was (re-)resolved.
  FeedbackResolved { id: i64 },
}

impl ChangeEvent {
  pub fn new_feedback(feedback: &Feedback) -> Self {
    Self::NewFeedback {
      message: format!("New feedback {} added", feedback.id),
    }
  }

  pub fn resolved(id: i64) -> Self { Self::FeedbackResolved { id } }

  /// The event name subscribers listen for.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::NewFeedback { .. } => "new_feedback",
      Self::FeedbackResolved { .. } => "feedback_resolved",
    }
  }

  /// The payload without the kind tag.
  pub fn payload(&self) -> serde_json::Value {
    match self {
      Self::NewFeedback { message } => serde_json::json!({ "message": message }),
      Self::FeedbackResolved { id } => serde_json::json!({ "id": id }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kind_matches_the_serde_tag() {
    for event in [
      ChangeEvent::NewFeedback { message: "m".into() },
      ChangeEvent::resolved(4),
    ] {
      let json = serde_json::to_value(&event).unwrap();
      assert_eq!(json["event"], event.kind());
      assert_eq!(json["data"], event.payload());
    }
  }

  #[test]
  fn resolved_payload_carries_the_id() {
    assert_eq!(
      ChangeEvent::resolved(12).payload(),
      serde_json::json!({ "id": 12 })
    );
  }
}
