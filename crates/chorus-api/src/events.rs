//! Live change notifications.
//!
//! [`Notifier`] is a fire-and-forget broadcast: each event reaches the
//! subscribers connected at the time it is published, at most once, and is
//! then gone. `GET /events` exposes it as a server-sent event stream.

use std::{convert::Infallible, time::Duration};

use axum::{
  extract::State,
  response::sse::{Event, KeepAlive, Sse},
};
use chorus_core::{event::ChangeEvent, store::FeedbackStore};
use tokio::sync::broadcast;
use tokio_stream::{
  Stream, StreamExt as _,
  wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
};

use crate::ApiState;

/// Interval between SSE keep-alive comments.
const KEEP_ALIVE: Duration = Duration::from_secs(30);

/// Broadcasts [`ChangeEvent`]s to every connected subscriber.
///
/// Cloning is cheap; all clones share one channel.
#[derive(Debug, Clone)]
pub struct Notifier {
  tx: broadcast::Sender<ChangeEvent>,
}

impl Notifier {
  /// `capacity` is how many events a slow subscriber may fall behind before
  /// it starts skipping.
  pub fn new(capacity: usize) -> Self {
    let (tx, _) = broadcast::channel(capacity.max(1));
    Self { tx }
  }

  /// Publish `event` without blocking. Having nobody listening is not an
  /// error; the event is dropped.
  pub fn publish(&self, event: ChangeEvent) {
    let kind = event.kind();
    match self.tx.send(event) {
      Ok(subscribers) => tracing::debug!(kind, subscribers, "event published"),
      Err(_) => tracing::debug!(kind, "no live subscribers, event dropped"),
    }
  }

  pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
    self.tx.subscribe()
  }

  pub fn subscriber_count(&self) -> usize { self.tx.receiver_count() }

  /// A stream of SSE frames for one new subscriber. Lagging subscribers skip
  /// what they missed and stay connected.
  pub fn sse_stream(
    &self,
  ) -> impl Stream<Item = Result<Event, Infallible>> + use<> {
    BroadcastStream::new(self.tx.subscribe()).filter_map(|msg| match msg {
      Ok(event) => match Event::default().event(event.kind()).json_data(event.payload()) {
        Ok(frame) => Some(Ok(frame)),
        Err(e) => {
          tracing::warn!(error = %e, "failed to encode event");
          None
        }
      },
      Err(BroadcastStreamRecvError::Lagged(skipped)) => {
        tracing::warn!(skipped, "live subscriber lagged, events skipped");
        None
      }
    })
  }
}

/// `GET /events` — server-sent `new_feedback` / `feedback_resolved` events.
pub async fn stream<S>(
  State(state): State<ApiState<S>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
  S: FeedbackStore + 'static,
{
  let stream = state.notifier.sse_stream();
  tracing::info!(
    subscribers = state.notifier.subscriber_count(),
    "live subscriber connected"
  );
  Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE))
}
