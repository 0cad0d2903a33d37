//! Key codes and runtime events for ke.
//!
//! Keys travel as the small integer codes a terminal reader produces: bytes
//! for ordinary input, `key & 0x1f` for control chords, and sentinels at 1000
//! and up for navigation keys. [`KeyCode`] is the closed decoding of those
//! integers that the mode machine matches on.
//!
//! Runtime events are produced by [`EventSource`]s into one bounded channel
//! and consumed by a single loop, one event at a time.

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

/// Capacity of the runtime event channel. Producers wait when it is full.
pub const EVENT_CHANNEL_CAP: usize = 1024;

/// Events dropped because the consumer had gone away.
pub static CHANNEL_SEND_FAILURES: AtomicU64 = AtomicU64::new(0);
/// Key events forwarded by the terminal input source.
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Raw integer key codes.
pub mod raw {
    pub const TAB: i32 = 9;
    pub const ENTER: i32 = 13;
    pub const ESC: i32 = 27;
    pub const BACKSPACE: i32 = 127;
    pub const ARROW_LEFT: i32 = 1000;
    pub const ARROW_RIGHT: i32 = 1001;
    pub const ARROW_UP: i32 = 1002;
    pub const ARROW_DOWN: i32 = 1003;
    pub const DEL: i32 = 1004;
    pub const HOME: i32 = 1005;
    pub const END: i32 = 1006;
    pub const PG_UP: i32 = 1007;
    pub const PG_DN: i32 = 1008;

    /// Control chord of `key`.
    pub const fn ctrl(key: u8) -> i32 {
        (key & 0x1f) as i32
    }
}

/// A decoded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable ASCII byte or one byte of a multi-byte UTF-8 sequence.
    Char(u8),
    /// A control chord, named by its key: `Ctrl(b'k')` is C-k, `Ctrl(b' ')`
    /// is C-SPACE.
    Ctrl(u8),
    Tab,
    Enter,
    Esc,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    /// A code outside every known range.
    Unknown(i32),
}

impl KeyCode {
    /// Decode a raw key code. Zero and negative values mean no key was read.
    pub fn from_raw(code: i32) -> Option<Self> {
        let key = match code {
            ..=0 => return None,
            raw::TAB => KeyCode::Tab,
            raw::ENTER => KeyCode::Enter,
            raw::ESC => KeyCode::Esc,
            raw::BACKSPACE => KeyCode::Backspace,
            1..=26 => KeyCode::Ctrl(code as u8 + 0x60),
            28..=31 => KeyCode::Ctrl(code as u8 + 0x40),
            0x20..=0xff => KeyCode::Char(code as u8),
            raw::ARROW_LEFT => KeyCode::Left,
            raw::ARROW_RIGHT => KeyCode::Right,
            raw::ARROW_UP => KeyCode::Up,
            raw::ARROW_DOWN => KeyCode::Down,
            raw::DEL => KeyCode::Delete,
            raw::HOME => KeyCode::Home,
            raw::END => KeyCode::End,
            raw::PG_UP => KeyCode::PageUp,
            raw::PG_DN => KeyCode::PageDown,
            other => KeyCode::Unknown(other),
        };
        Some(key)
    }

    /// The raw integer for this key. `Ctrl(b' ')` encodes as 0.
    pub fn to_raw(self) -> i32 {
        match self {
            KeyCode::Char(b) => i32::from(b),
            KeyCode::Ctrl(k) => raw::ctrl(k),
            KeyCode::Tab => raw::TAB,
            KeyCode::Enter => raw::ENTER,
            KeyCode::Esc => raw::ESC,
            KeyCode::Backspace => raw::BACKSPACE,
            KeyCode::Left => raw::ARROW_LEFT,
            KeyCode::Right => raw::ARROW_RIGHT,
            KeyCode::Up => raw::ARROW_UP,
            KeyCode::Down => raw::ARROW_DOWN,
            KeyCode::Delete => raw::DEL,
            KeyCode::Home => raw::HOME,
            KeyCode::End => raw::END,
            KeyCode::PageUp => raw::PG_UP,
            KeyCode::PageDown => raw::PG_DN,
            KeyCode::Unknown(code) => code,
        }
    }

    /// Bytes that insert themselves in Normal mode.
    pub fn insertable(self) -> Option<u8> {
        match self {
            KeyCode::Char(b) => Some(b),
            KeyCode::Tab => Some(b'\t'),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(b) if b.is_ascii_graphic() || *b == b' ' => write!(f, "{}", *b as char),
            KeyCode::Ctrl(b' ') => f.write_str("C-SPC"),
            KeyCode::Ctrl(k) => write!(f, "C-{}", *k as char),
            KeyCode::Tab => f.write_str("TAB"),
            KeyCode::Enter => f.write_str("RET"),
            KeyCode::Esc => f.write_str("ESC"),
            KeyCode::Backspace => f.write_str("BACKSPACE"),
            KeyCode::Delete => f.write_str("DEL"),
            other => write!(f, "{:04x}", other.to_raw()),
        }
    }
}

/// Top-level event consumed by the runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyCode),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// Periodic tick driving status message expiry.
    Tick,
    Shutdown,
}

/// A producer of runtime events. Each source owns one background task that
/// stops once sending fails because the consumer dropped the channel.
pub trait EventSource: Send + 'static {
    fn name(&self) -> &'static str;
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()>;
}

/// Sources registered at startup and spawned together.
#[derive(Default)]
pub struct EventSourceRegistry {
    sources: Vec<Box<dyn EventSource>>,
}

impl EventSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: EventSource>(&mut self, src: S) {
        self.sources.push(Box::new(src));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Spawn every registered source. Each receives its own sender clone, so
    /// dropping the caller's last sender lets them all observe closure.
    pub fn spawn_all(&mut self, tx: &Sender<Event>) -> Vec<JoinHandle<()>> {
        let mut out = Vec::with_capacity(self.sources.len());
        for src in self.sources.drain(..) {
            tracing::info!(target: "runtime.events", source = src.name(), "spawning event source");
            out.push(src.spawn(tx.clone()));
        }
        out
    }
}

/// Emits [`Event::Tick`] every `interval`.
pub struct TickEventSource {
    interval: Duration,
}

impl TickEventSource {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl EventSource for TickEventSource {
    fn name(&self) -> &'static str {
        "tick"
    }

    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        let dur = self.interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(dur);
            loop {
                interval.tick().await;
                if tx.send(Event::Tick).await.is_err() {
                    break;
                }
            }
        })
    }
}
