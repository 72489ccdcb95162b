//! Raw-mode terminal setup for the drill screens.

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error};

pub type DrillTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen. The panic hook puts the
/// terminal back before the panic message is printed.
pub fn init() -> io::Result<DrillTerminal> {
    install_panic_hook();
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    debug!("terminal initialized");
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    debug!("terminal restored");
    Ok(())
}

fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        error!(%info, "panic in drill");
        previous(info);
    }));
}
