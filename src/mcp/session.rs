//! Session Transport State
//!
//! This module owns the "single active session" lifecycle: at most one
//! long-lived SSE stream is registered at a time, a new stream silently
//! replaces the previous one, and stream closure clears the slot so the
//! side channel can answer "no active session" instead of writing to a
//! dead connection.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};
use std::task::{Context, Poll};

use axum::response::sse::Event;
use futures_util::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use uuid::Uuid;

use crate::state::SharedState;

// =============================================================================
// Session
// =============================================================================

/// Sending half of one open SSE stream.
///
/// Clones share the same underlying channel, so the side channel can hold on
/// to a session reference while the registry slot is replaced: sends against
/// a closed stream fail harmlessly instead of crashing.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    tx: mpsc::UnboundedSender<Event>,
}

impl Session {
    /// Opens a fresh session, returning it together with the receiving half
    /// the SSE response body drains.
    pub fn open() -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                id: Uuid::new_v4(),
                tx,
            },
            rx,
        )
    }

    /// Identifier of this session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Queues an event for delivery on the stream.
    ///
    /// Returns `false` when the stream is gone; the event is dropped.
    pub fn send(&self, event: Event) -> bool {
        self.tx.send(event).is_ok()
    }
}

// =============================================================================
// Session Registry
// =============================================================================

/// Single-slot registry holding the active session, if any.
///
/// The slot is mutated by stream open (set) and stream close (clear); the
/// side channel only reads it. The lock is never held across an await.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    active: Mutex<Option<Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `session` as the sole active session, replacing any previous
    /// one. The replaced stream stays open but no longer receives responses.
    pub fn set(&self, session: Session) {
        *self.lock() = Some(session);
    }

    /// Returns a handle to the active session, if one is registered.
    pub fn get(&self) -> Option<Session> {
        self.lock().clone()
    }

    /// Clears the slot, but only if it still holds the session identified by
    /// `id`. A replaced session closing later must not evict its successor.
    pub fn clear_if(&self, id: Uuid) {
        let mut active = self.lock();
        if active.as_ref().map(Session::id) == Some(id) {
            *active = None;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Session Stream
// =============================================================================

/// SSE body of one stream connection.
///
/// Dropping the stream (the client disconnected or the response was torn
/// down) clears the registry slot for this session.
pub struct SessionStream {
    events: UnboundedReceiverStream<Event>,
    _guard: SessionGuard,
}

impl SessionStream {
    pub fn new(id: Uuid, rx: mpsc::UnboundedReceiver<Event>, state: SharedState) -> Self {
        Self {
            events: UnboundedReceiverStream::new(rx),
            _guard: SessionGuard { id, state },
        }
    }
}

impl Stream for SessionStream {
    type Item = Result<Event, Infallible>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().events)
            .poll_next(cx)
            .map(|event| event.map(Ok))
    }
}

struct SessionGuard {
    id: Uuid,
    state: SharedState,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.state.sessions.clear_if(self.id);
        tracing::info!(session_id = %self.id, "SSE stream closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_active_session() {
        let registry = SessionRegistry::new();
        assert!(registry.get().is_none());

        let (first, _first_rx) = Session::open();
        let (second, _second_rx) = Session::open();
        let first_id = first.id();
        let second_id = second.id();

        registry.set(first);
        registry.set(second);

        assert_eq!(registry.get().map(|s| s.id()), Some(second_id));

        // The replaced session closing must not evict its successor.
        registry.clear_if(first_id);
        assert_eq!(registry.get().map(|s| s.id()), Some(second_id));

        registry.clear_if(second_id);
        assert!(registry.get().is_none());
    }

    #[test]
    fn test_send_after_stream_dropped() {
        let (session, rx) = Session::open();
        drop(rx);
        assert!(!session.send(Event::default().data("lost")));
    }

    #[tokio::test]
    async fn test_send_queues_event_for_stream() {
        let (session, mut rx) = Session::open();
        assert!(session.send(Event::default().data("hello")));
        assert!(rx.recv().await.is_some());
    }
}
