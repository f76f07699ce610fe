//! Terminal session for the editor: raw mode plus the alternate screen, handed back exactly
//! once whether the editor quits, panics out of `run`, or is killed by a signal.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The two terminal transitions, behind a trait so tests can count them.
pub trait TerminalMode: Send + Sync + 'static {
    fn enter(&self) -> io::Result<()>;
    fn leave(&self) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
    fn enter(&self) -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)
    }

    fn leave(&self) -> io::Result<()> {
        // raw mode 必须关掉，即使换屏失败
        let raw = crossterm::terminal::disable_raw_mode();
        let screen = crossterm::execute!(
            io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        raw.and(screen)
    }
}

struct Session {
    left: AtomicBool,
    mode: Box<dyn TerminalMode>,
}

impl Session {
    fn leave(&self) -> io::Result<()> {
        if self.left.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.mode.leave()
    }
}

/// Shared with the signal thread so it can put the terminal back before exiting.
#[derive(Clone)]
pub struct SessionHandle(Arc<Session>);

impl SessionHandle {
    pub fn leave(&self) -> io::Result<()> {
        self.0.leave()
    }
}

/// Leaves the terminal session on drop.
pub struct TerminalGuard {
    session: Arc<Session>,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::enter(CrosstermMode)
    }

    pub fn enter(mode: impl TerminalMode) -> io::Result<Self> {
        mode.enter()?;
        Ok(Self {
            session: Arc::new(Session {
                left: AtomicBool::new(false),
                mode: Box::new(mode),
            }),
        })
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle(self.session.clone())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.session.leave() {
            tracing::warn!(error = %e, "terminal restore failed");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Hangup,
    Interrupt,
    Terminate,
}

impl TerminationSignal {
    #[cfg(unix)]
    fn from_raw(sig: i32) -> Option<Self> {
        use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
        match sig {
            SIGHUP => Some(Self::Hangup),
            SIGINT => Some(Self::Interrupt),
            SIGTERM => Some(Self::Terminate),
            _ => None,
        }
    }

    /// 128 + signal number, as a shell reports it.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Hangup => 129,
            Self::Interrupt => 130,
            Self::Terminate => 143,
        }
    }
}

/// Grace period for the main loop to notice a signal before the watcher exits for it.
pub const SIGNAL_GRACE: std::time::Duration = std::time::Duration::from_secs(2);

/// Forwards SIGHUP/SIGINT/SIGTERM to the main loop. If the loop is still running after
/// [`SIGNAL_GRACE`], the watcher leaves the terminal session and exits the process itself.
#[cfg(unix)]
pub fn watch_termination_signals(
    session: SessionHandle,
    tx: std::sync::mpsc::Sender<TerminationSignal>,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};

    let mut signals = signal_hook::iterator::Signals::new([SIGHUP, SIGINT, SIGTERM])?;
    Ok(std::thread::spawn(move || {
        let Some(signal) = signals.forever().find_map(TerminationSignal::from_raw) else {
            return;
        };
        tracing::info!(?signal, "termination signal received");
        let _ = tx.send(signal);

        std::thread::sleep(SIGNAL_GRACE);
        let _ = session.leave();
        std::process::exit(signal.exit_code());
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
