//! `ke`: a modal terminal text editor.
use anyhow::Result;
use clap::Parser;
use core_actions::{Session, dispatch, files, settle};
use core_config::load_from;
use core_events::{EVENT_CHANNEL_CAP, Event, EventSourceRegistry, TickEventSource};
use core_render::{View, Writer, paint};
use core_state::{EditorState, Settings};
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalGuard, TerminalInputSource};
use std::fmt;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "ke.log";
const TICK_INTERVAL: Duration = Duration::from_millis(250);
const SOURCE_STOP_TIMEOUT: Duration = Duration::from_millis(200);

#[derive(Parser, Debug)]
#[command(name = "ke", version, about = "A small modal text editor")]
struct Args {
    /// Files to open at startup; the first one is shown.
    pub paths: Vec<PathBuf>,
    /// Configuration file (overrides discovery of `ke.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

struct RuntimeContext<'a> {
    editor: Editor,
    terminal_guard: TerminalGuard<'a>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn run(&mut self) -> Result<RuntimeContext<'_>> {
        self.configure_logging()?;
        Self::install_panic_hook();
        info!(target: "runtime", "startup");

        let args = Args::parse();
        let config = load_from(args.config.clone())?;
        let settings = Settings {
            reflow_margin: config.reflow_margin(),
            undo_limit: config.undo_limit(),
            status_timeout: config.status_timeout(),
            completion_width: config.completion_width(),
        };

        self.backend.set_title("ke")?;
        let (cols, rows) = self.backend.size()?;
        let mut editor = Editor::new(settings);
        editor.state.resize(cols as usize, rows as usize);
        editor.open_paths(&args.paths);
        info!(
            target: "runtime",
            files = args.paths.len(),
            config_override = args.config.is_some(),
            cols,
            rows,
            "bootstrap_complete"
        );

        let terminal_guard = self.backend.enter_guard()?;
        Ok(RuntimeContext {
            editor,
            terminal_guard,
        })
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                core_terminal::restore_terminal();
                error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    Quit,
    ShutdownEvent,
    ChannelClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Quit => "quit",
            ShutdownReason::ShutdownEvent => "shutdown_event",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue { repaint: bool },
    Break { reason: ShutdownReason },
}

/// Editor state plus input session; everything the loop does to them is
/// synchronous.
struct Editor {
    session: Session,
    state: EditorState,
}

impl Editor {
    fn new(settings: Settings) -> Self {
        Self {
            session: Session::new(),
            state: EditorState::new(settings),
        }
    }

    fn open_paths(&mut self, paths: &[PathBuf]) {
        for p in paths {
            files::open_file(&mut self.state, &p.to_string_lossy());
        }
        if paths.len() > 1 {
            self.state.buffers.switch(0);
        }
        settle(&mut self.state);
    }

    fn handle(&mut self, event: &Event) -> LoopControl {
        match event {
            Event::Key(key) => {
                let span = tracing::trace_span!(target: "actions.dispatch", "dispatch", key = %key);
                let result = span.in_scope(|| dispatch(*key, &mut self.session, &mut self.state));
                trace!(
                    target: "actions.dispatch",
                    dirty = result.dirty,
                    buffer_replaced = result.buffer_replaced,
                    quit = result.quit,
                    "dispatch_outcome"
                );
                if result.quit {
                    LoopControl::Break {
                        reason: ShutdownReason::Quit,
                    }
                } else {
                    LoopControl::Continue { repaint: true }
                }
            }
            Event::Resize(cols, rows) => {
                self.state.resize(*cols as usize, *rows as usize);
                settle(&mut self.state);
                LoopControl::Continue { repaint: true }
            }
            Event::Tick => LoopControl::Continue {
                repaint: self.state.tick_status(),
            },
            Event::Shutdown => LoopControl::Break {
                reason: ShutdownReason::ShutdownEvent,
            },
        }
    }

    fn frame(&self) -> Writer {
        let prompt = self.session.prompt().map(|p| p.line());
        let view = View {
            mode: self.session.mode().indicator(),
            prompt: prompt.as_deref(),
        };
        let mut w = Writer::new();
        paint(&self.state, &view, &mut w);
        w
    }

    fn render(&self) {
        if let Err(e) = self.frame().flush_to(&mut stdout()) {
            error!(target: "runtime", ?e, "render_error");
        }
    }
}

struct EditorRuntime<'a> {
    editor: Editor,
    rx: mpsc::Receiver<Event>,
    tx: Option<mpsc::Sender<Event>>,
    source_handles: Vec<JoinHandle<()>>,
    _terminal_guard: TerminalGuard<'a>,
}

impl<'a> EditorRuntime<'a> {
    fn new(
        context: RuntimeContext<'a>,
        tx: mpsc::Sender<Event>,
        rx: mpsc::Receiver<Event>,
        source_handles: Vec<JoinHandle<()>>,
    ) -> Self {
        Self {
            editor: context.editor,
            rx,
            tx: Some(tx),
            source_handles,
            _terminal_guard: context.terminal_guard,
        }
    }

    async fn run(&mut self) -> Result<()> {
        self.editor.render();

        let mut shutdown_reason = ShutdownReason::ChannelClosed;
        while let Some(event) = self.rx.recv().await {
            match self.editor.handle(&event) {
                LoopControl::Break { reason } => {
                    shutdown_reason = reason;
                    break;
                }
                LoopControl::Continue { repaint: true } => self.editor.render(),
                LoopControl::Continue { repaint: false } => {}
            }
        }

        self.rx.close();
        self.finalize_shutdown(shutdown_reason).await;
        Ok(())
    }

    async fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        info!(target: "runtime", %reason, "shutdown_begin");
        if let Some(tx) = self.tx.take() {
            drop(tx);
        }
        while let Some(handle) = self.source_handles.pop() {
            match tokio::time::timeout(SOURCE_STOP_TIMEOUT, handle).await {
                Ok(Ok(())) => trace!(target: "runtime", "event_source_task_stopped"),
                Ok(Err(err)) if err.is_cancelled() => {
                    trace!(target: "runtime", "event_source_task_cancelled")
                }
                Ok(Err(err)) => error!(target: "runtime", ?err, "event_source_task_error"),
                Err(_) => warn!(target: "runtime", "event_source_task_timeout"),
            }
        }
        info!(target: "runtime", %reason, "shutdown_complete");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    let context = startup.run()?;
    let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let mut registry = EventSourceRegistry::new();
    registry.register(TerminalInputSource);
    registry.register(TickEventSource::new(TICK_INTERVAL));
    let source_handles = registry.spawn_all(&tx);

    let mut runtime = EditorRuntime::new(context, tx, rx, source_handles);
    runtime.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::KeyCode;
    use core_render::writer::Command;
    use pretty_assertions::assert_eq;

    fn editor() -> Editor {
        let mut ed = Editor::new(Settings::default());
        ed.state.resize(40, 10);
        ed
    }

    fn printed(w: &Writer) -> String {
        w.commands()
            .iter()
            .filter_map(|c| match c {
                Command::Print(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn keys_edit_and_request_repaint() {
        let mut ed = editor();
        let ctl = ed.handle(&Event::Key(KeyCode::Char(b'h')));
        assert_eq!(ctl, LoopControl::Continue { repaint: true });
        assert_eq!(ed.state.current_doc().lines(), vec!["h"]);
    }

    #[test]
    fn quit_breaks_the_loop() {
        let mut ed = editor();
        ed.handle(&Event::Key(KeyCode::Ctrl(b'k')));
        let ctl = ed.handle(&Event::Key(KeyCode::Char(b'q')));
        assert_eq!(
            ctl,
            LoopControl::Break {
                reason: ShutdownReason::Quit
            }
        );
    }

    #[test]
    fn resize_updates_screen() {
        let mut ed = editor();
        ed.handle(&Event::Resize(100, 30));
        assert_eq!((ed.state.screen_cols, ed.state.screen_rows), (100, 30));
    }

    #[test]
    fn tick_repaints_only_when_status_expires() {
        let mut ed = editor();
        assert_eq!(
            ed.handle(&Event::Tick),
            LoopControl::Continue { repaint: false }
        );
        ed.state.settings.status_timeout = Duration::ZERO;
        ed.state.set_status("gone");
        assert_eq!(
            ed.handle(&Event::Tick),
            LoopControl::Continue { repaint: true }
        );
    }

    #[test]
    fn frame_shows_mode_and_prompt() {
        let mut ed = editor();
        ed.handle(&Event::Key(KeyCode::Ctrl(b'k')));
        assert!(printed(&ed.frame()).contains("K-ke: [no file]"));
        ed.handle(&Event::Key(KeyCode::Char(b'g')));
        assert!(printed(&ed.frame()).contains("Line: "));
    }

    #[test]
    fn open_paths_shows_first_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "alpha\n").unwrap();
        std::fs::write(&b, "beta\n").unwrap();
        let mut ed = editor();
        ed.open_paths(&[a, b]);
        assert_eq!(ed.state.buffers.len(), 2);
        assert_eq!(ed.state.current_doc().lines(), vec!["alpha"]);
    }
}
