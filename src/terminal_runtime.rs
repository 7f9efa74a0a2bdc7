use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::warn;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::game::GameState;
use crate::renderer;

type SnakeTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw-mode alternate screen holding the board. Dropping it hands the
/// terminal back to the shell.
pub struct TerminalSession {
    terminal: SnakeTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        Terminal::new(CrosstermBackend::new(stdout))
            .map(|terminal| Self { terminal })
            .inspect_err(|_| {
                let _ = restore_terminal();
            })
    }

    /// Draws one frame of `state`.
    pub fn draw(&mut self, state: &GameState) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, state))
            .map(|_| ())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(error) = restore_terminal() {
            warn!("failed to restore terminal: {error}");
        }
    }
}

/// Leaves raw mode and the alternate screen. Idempotent.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    execute!(io::stdout(), Show, LeaveAlternateScreen)
}

/// Chains a terminal restore in front of the current panic hook so a panic
/// mid-frame still prints to a usable shell.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
