mod display;
mod vote;

#[cfg(test)]
pub use display::DisplayIndex;

use display::CandidateView;

use crate::commands::{self, Action, Button};
use crate::db::{Database, DbError};
use crate::models::CandidateId;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStep {
    Name,
    Party,
}

/// Modal layer drawn over the candidate list. While one is open it receives
/// every key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Prompt {
        step: PromptStep,
        name: String,
        input: String,
    },
    Confirm {
        offset: usize,
    },
    Message {
        title: &'static str,
        body: String,
        is_error: bool,
    },
    Results(String),
}

/// Owns the window state: the shown rows, their display index, the selection
/// and any open overlay.
pub struct App {
    database: Database,
    view: CandidateView,
    selected: Option<usize>,
    overlay: Option<Overlay>,
    should_quit: bool,
}

impl App {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            view: CandidateView::default(),
            selected: None,
            overlay: None,
            should_quit: false,
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.view.rows
    }

    #[cfg(test)]
    pub fn display_index(&self) -> &DisplayIndex {
        &self.view.index
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Route one key press, to the open overlay if there is one.
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if self.overlay.is_some() {
            self.handle_overlay_key(key).await;
            return;
        }

        match commands::action_for_key(key) {
            Some(Action::SelectNext) => self.select_next(),
            Some(Action::SelectPrevious) => self.select_previous(),
            Some(Action::Press(button)) => self.press(button).await,
            None => {}
        }
    }

    pub async fn press(&mut self, button: Button) {
        match button {
            Button::Refresh => self.refresh().await,
            Button::AddCandidate => self.begin_add(),
            Button::Vote => self.vote().await,
            Button::ViewResults => self.show_results().await,
            Button::DeleteCandidate => self.request_delete(),
            Button::Exit => {
                info!("Exit requested");
                self.should_quit = true;
            }
        }
    }

    async fn handle_overlay_key(&mut self, key: KeyEvent) {
        match self.overlay {
            Some(Overlay::Prompt { .. }) => self.handle_prompt_key(key).await,
            Some(Overlay::Confirm { .. }) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.confirm_delete(true).await
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirm_delete(false).await
                }
                _ => {}
            },
            Some(Overlay::Message { .. }) | Some(Overlay::Results(_)) => self.overlay = None,
            None => {}
        }
    }

    async fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_prompt().await,
            KeyCode::Esc => self.cancel_prompt(),
            KeyCode::Backspace => {
                if let Some(Overlay::Prompt { input, .. }) = self.overlay.as_mut() {
                    input.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(Overlay::Prompt { input, .. }) = self.overlay.as_mut() {
                    input.push(c);
                }
            }
            _ => {}
        }
    }

    /// Reload the candidate list. Rows and index are swapped in together and
    /// the selection is cleared; on failure the old list stays up.
    pub async fn refresh(&mut self) {
        if let Err(e) = self.reload().await {
            self.show_error(e);
        }
    }

    async fn reload(&mut self) -> Result<(), DbError> {
        let candidates = self.database.list_candidates().await?;
        self.view = CandidateView::build(&candidates);
        self.selected = None;
        Ok(())
    }

    pub fn select_next(&mut self) {
        if self.view.index.is_empty() {
            return;
        }
        let last = self.view.index.len() - 1;
        self.selected = Some(match self.selected {
            Some(offset) => (offset + 1).min(last),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.view.index.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(offset) => offset.saturating_sub(1),
            None => 0,
        });
    }

    // Candidate id behind the highlighted row
    fn selected_candidate(&self) -> Option<CandidateId> {
        self.selected
            .and_then(|offset| self.view.index.id_for_position(offset + 1))
    }

    pub fn begin_add(&mut self) {
        self.overlay = Some(Overlay::Prompt {
            step: PromptStep::Name,
            name: String::new(),
            input: String::new(),
        });
    }

    fn cancel_prompt(&mut self) {
        self.overlay = None;
    }

    /// Accept the current prompt. A blank answer at either step drops the
    /// whole add without touching the database.
    pub async fn submit_prompt(&mut self) {
        if !matches!(self.overlay, Some(Overlay::Prompt { .. })) {
            return;
        }
        let Some(Overlay::Prompt { step, name, input }) = self.overlay.take() else {
            return;
        };

        if input.trim().is_empty() {
            return;
        }

        match step {
            PromptStep::Name => {
                self.overlay = Some(Overlay::Prompt {
                    step: PromptStep::Party,
                    name: input,
                    input: String::new(),
                });
            }
            PromptStep::Party => {
                let result = match self.database.add_candidate(&name, &input).await {
                    Ok(()) => self.reload().await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => self.show_info("Success", "Candidate added."),
                    Err(e) => self.show_error(e),
                }
            }
        }
    }

    pub fn request_delete(&mut self) {
        match self.selected {
            Some(offset) if self.view.index.id_at(offset).is_some() => {
                self.overlay = Some(Overlay::Confirm { offset });
            }
            _ => self.show_input_error("Select a candidate to delete."),
        }
    }

    /// Answer the delete confirmation. Declining leaves the list and the
    /// selection as they were.
    pub async fn confirm_delete(&mut self, confirmed: bool) {
        let Some(Overlay::Confirm { offset }) = self.overlay else {
            return;
        };
        self.overlay = None;
        if !confirmed {
            return;
        }

        let Some(candidate_id) = self.view.index.id_at(offset) else {
            self.show_input_error("Select a candidate to delete.");
            return;
        };

        let result = match self.database.delete_candidate(candidate_id).await {
            Ok(_) => self.reload().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => self.show_info("Deleted", "Candidate removed."),
            Err(e) => self.show_error(e),
        }
    }

    fn show_info(&mut self, title: &'static str, body: &str) {
        self.overlay = Some(Overlay::Message {
            title,
            body: body.to_string(),
            is_error: false,
        });
    }

    fn show_input_error(&mut self, body: &str) {
        self.overlay = Some(Overlay::Message {
            title: "Error",
            body: body.to_string(),
            is_error: true,
        });
    }

    fn show_error(&mut self, err: DbError) {
        if err.is_constraint() {
            warn!("Rejected by the database: {}", err);
        } else {
            error!("Database operation failed: {}", err);
        }
        self.overlay = Some(Overlay::Message {
            title: "Error",
            body: err.to_string(),
            is_error: true,
        });
    }
}
