//! Server-Sent Events support

use super::types::SessionSnapshot;
use crate::runtime::SessionEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Initial snapshot followed by live session events
pub fn sse_stream(
    init: SessionSnapshot,
    broadcast_rx: tokio::sync::broadcast::Receiver<SessionEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init_event = Event::default()
        .event("init")
        .data(json!({ "type": "init", "session": init }).to_string());
    let init = futures::stream::once(async move { Ok(init_event) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(session_event_to_axum(event))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(init.chain(broadcasts)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn session_event_to_axum(event: SessionEvent) -> Event {
    let data = json!({
        "type": event.event_type,
        "data": event.data,
    });
    Event::default().event(event.event_type).data(data.to_string())
}
