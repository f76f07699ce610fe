use codecook::kernel::services::adapters::load_settings;
use codecook::kernel::services::ports::Settings;
use codecook::tui::crossterm::into_key;
use codecook::tui::render::render;
use codecook::tui::terminal_guard::TerminalGuard;
use codecook::tui::App;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::mpsc;
use std::time::Duration;

mod logging;
mod startup;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    let cwd = std::env::current_dir()?;
    let arg = std::env::args().nth(1);
    let startup = match startup::resolve_startup(&cwd, arg.as_deref()) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("codecook: {e}");
            std::process::exit(2);
        }
    };

    let _logging = logging::init();

    // 配置有问题也照常打开编辑器，进入后提示
    let (settings, settings_error) = match load_settings() {
        Ok(settings) => (settings, None),
        Err(e) => {
            tracing::warn!(error = %e, "settings not loaded");
            (Settings::default(), Some(e.to_string()))
        }
    };

    let buffer = startup::read_buffer(&startup)?;
    let mut app = App::new(startup.path.clone(), buffer, settings)?;
    if let Some(message) = settings_error {
        app.show_message(message, true);
    }

    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel();
    #[cfg(unix)]
    codecook::tui::terminal_guard::watch_termination_signals(guard.handle(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app, &signal_rx);
    drop(guard);

    if app.is_dirty() {
        tracing::info!(path = %app.path().display(), "exited with unsaved changes");
    }
    tracing::info!("codecook exited");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    signals: &mpsc::Receiver<codecook::tui::terminal_guard::TerminationSignal>,
) -> io::Result<()> {
    let mut redraw = true;
    loop {
        if redraw {
            terminal.draw(|frame| render(app, frame))?;
            redraw = false;
        }

        if let Ok(signal) = signals.try_recv() {
            tracing::info!(?signal, "shutting down");
            return Ok(());
        }

        if crossterm::event::poll(POLL_INTERVAL)? {
            match crossterm::event::read()? {
                crossterm::event::Event::Resize(_, _) => redraw = true,
                event => {
                    if let Some(key) = into_key(event) {
                        let result = app.handle_key(key);
                        if result.is_quit() {
                            return Ok(());
                        }
                        redraw = true;
                    }
                }
            }
        }

        redraw |= app.tick();
    }
}
