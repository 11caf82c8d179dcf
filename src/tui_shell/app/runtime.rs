use std::io::{self, IsTerminal, Stdout};

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::remote::RemoteStore;

use super::{App, event_loop};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus the alternate screen, undone on drop so an error or a panic
/// in the loop still hands the shell back intact.
struct Screen {
    terminal: Term,
}

impl Screen {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            disable_raw_mode().ok();
            return Err(err).context("enter alternate screen");
        }
        let mut terminal =
            Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")?;
        terminal.clear().ok();
        Ok(Self { terminal })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        disable_raw_mode().ok();
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).ok();
        self.terminal.show_cursor().ok();
    }
}

pub(super) fn run<S: RemoteStore>(mut app: App<S>) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("the interactive page needs a terminal; use a subcommand instead (see --help)");
    }
    let mut screen = Screen::enter()?;
    event_loop::run_loop(&mut screen.terminal, &mut app)
}
