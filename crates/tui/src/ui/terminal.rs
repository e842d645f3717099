use std::io::{Stdout, stdout};

use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::error::Result;

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw-mode alternate screen, restored when dropped so an early return or a panic does not
/// leave the user's shell unusable.
pub struct TerminalGuard {
    terminal: AppTerminal,
    restored: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        crossterm::execute!(out, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(out))?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }

    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        leave(&mut self.terminal)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.restored {
            let _ = leave(&mut self.terminal);
        }
    }
}

fn leave(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
