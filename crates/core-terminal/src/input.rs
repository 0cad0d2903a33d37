//! Terminal input source over crossterm's async `EventStream`.

use std::io;
use std::sync::atomic::Ordering;

use core_events::{CHANNEL_SEND_FAILURES, Event, EventSource, KEYPRESS_TOTAL};
use crossterm::event::{Event as CEvent, EventStream};
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio_stream::{Stream, StreamExt};
use tracing::{info, trace, warn};

use crate::keys::translate_key;

/// Reads the terminal and forwards keys and resizes to the runtime.
#[derive(Debug, Default)]
pub struct TerminalInputSource;

impl EventSource for TerminalInputSource {
    fn name(&self) -> &'static str {
        "terminal-input"
    }

    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        tokio::spawn(async move {
            InputTask::new(tx, EventStream::new()).run().await;
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    StreamEnded,
    StreamError,
    ChannelClosed,
}

impl Stop {
    fn as_str(self) -> &'static str {
        match self {
            Stop::StreamEnded => "stream_ended",
            Stop::StreamError => "stream_error",
            Stop::ChannelClosed => "channel_closed",
        }
    }
}

pub(crate) struct InputTask<S> {
    sender: Sender<Event>,
    stream: S,
}

impl<S> InputTask<S>
where
    S: Stream<Item = io::Result<CEvent>> + Unpin,
{
    pub(crate) fn new(sender: Sender<Event>, stream: S) -> Self {
        Self { sender, stream }
    }

    pub(crate) async fn run(mut self) {
        info!(target: "runtime.events", "input_task_started");
        let stop = loop {
            let Some(next) = self.stream.next().await else {
                break Stop::StreamEnded;
            };
            let sent = match next {
                Ok(CEvent::Key(key)) => {
                    let mut ok = true;
                    for code in translate_key(&key) {
                        KEYPRESS_TOTAL.fetch_add(1, Ordering::Relaxed);
                        trace!(target: "runtime.events", key = %code, "key");
                        if !self.send(Event::Key(code)).await {
                            ok = false;
                            break;
                        }
                    }
                    ok
                }
                Ok(CEvent::Resize(cols, rows)) => {
                    trace!(target: "runtime.events", cols, rows, "resize");
                    self.send(Event::Resize(cols, rows)).await
                }
                Ok(_) => true,
                Err(err) => {
                    warn!(target: "runtime.events", error_kind = ?err.kind(), "input_stream_error");
                    break Stop::StreamError;
                }
            };
            if !sent {
                break Stop::ChannelClosed;
            }
        };
        info!(target: "runtime.events", reason = stop.as_str(), "input_task_stopped");
    }

    async fn send(&self, event: Event) -> bool {
        if self.sender.send(event).await.is_err() {
            CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        true
    }
}
