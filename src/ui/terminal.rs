//! Terminal setup and the main event loop

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::handlers::App;

fn init_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Open the window, load the list and run until Exit.
pub async fn run(mut app: App) -> io::Result<()> {
    let mut terminal = init_terminal()?;

    app.refresh().await;
    let result = run_loop(&mut terminal, &mut app).await;
    if let Err(e) = &result {
        error!("Event loop failed: {}", e);
    }

    // Restore even if the loop failed
    let restored = restore_terminal(&mut terminal);
    info!("Window closed");
    first_error(result, restored)
}

// A loop failure is reported ahead of a failure to restore the terminal
fn first_error(result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    result.and(restored)
}

// Each key is handled to completion, database call included, before the next
// event is read.
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| super::render(f, app))?;

        if let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key).await;
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
