//! Inspector runner: main loop that wires everything together.
//!
//! Creates terminal, runs the TEA loop, restores the terminal on exit.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::time::interval;
use tracing::{debug, error, info};

use super::app::InspectorApp;
use super::event::InspectorMessage;
use super::layout;

/// Raw mode plus alternate screen; left again on drop.
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on the guard owns the restore.
        let guard = Self { active: true };
        io::stdout().execute(EnterAlternateScreen)?;
        Ok(guard)
    }

    /// Restore now and report errors.
    fn restore(mut self) -> io::Result<()> {
        self.active = false;
        restore_terminal()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = restore_terminal();
        }
    }
}

/// Leave raw mode and the alternate screen. Harmless if neither is active.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Restore the terminal before the panic message is printed.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        error!("inspector panicked: {panic_info}");
        previous(panic_info);
    }));
}

/// Run the inspector main loop. Blocks until quit.
pub async fn run_tui(mut app: InspectorApp) -> anyhow::Result<()> {
    install_panic_hook();
    let guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    // Restore terminal even if the loop failed
    guard.restore()?;
    info!("inspector closed");
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut InspectorApp,
) -> anyhow::Result<()> {
    let mut tick_interval = interval(Duration::from_millis(app.config.tick_ms.max(1)));
    let mut render_interval = interval(Duration::from_millis(app.config.render_ms.max(1)));
    let mut drawn_revision = None;

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                app.update(InspectorMessage::Tick);
            }
            _ = render_interval.tick() => {
                app.update(InspectorMessage::Render);
                terminal.draw(|f| layout::draw(f, app))?;
                let revision = app.store.revision();
                if drawn_revision != Some(revision) {
                    debug!(revision, "store change drawn");
                    drawn_revision = Some(revision);
                }
            }
            // Poll crossterm events (non-blocking via tokio::task::spawn_blocking)
            result = tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            }) => {
                if let Ok(Some(Event::Key(key))) = result {
                    app.update(InspectorMessage::Input(key));
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
