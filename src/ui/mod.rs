pub mod terminal;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::commands::BUTTONS;
use crate::handlers::{App, Overlay, PromptStep};

/// Draw the whole window: candidate list, button bar, then any overlay on top.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(f.area());

    render_candidates(f, chunks[0], app);
    render_buttons(f, chunks[1]);

    if let Some(overlay) = app.overlay() {
        render_overlay(f, overlay);
    }
}

fn render_candidates(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app.rows().iter().map(|row| ListItem::new(row.as_str())).collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Voting App "))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(app.selected());
    f.render_stateful_widget(list, area, &mut state);
}

fn render_buttons(f: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for button in BUTTONS {
        spans.push(Span::styled(
            format!("[{}]", button.key()),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw(format!(" {}  ", button.label())));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_overlay(f: &mut Frame, overlay: &Overlay) {
    let (title, body, color) = match overlay {
        Overlay::Prompt { step, input, .. } => {
            let question = match step {
                PromptStep::Name => "Candidate name:",
                PromptStep::Party => "Candidate party:",
            };
            (
                "Add Candidate",
                format!("{}\n> {}_\n\nEnter: OK  Esc: Cancel", question, input),
                Color::Green,
            )
        }
        Overlay::Confirm { .. } => (
            "Confirm",
            "Delete this candidate? This will remove all their votes.\n\n[y] Yes  [n] No"
                .to_string(),
            Color::Yellow,
        ),
        Overlay::Message { title, body, is_error } => (
            *title,
            body.clone(),
            if *is_error { Color::Red } else { Color::Cyan },
        ),
        Overlay::Results(text) => ("Results", text.clone(), Color::Cyan),
    };

    let area = centered_rect(60, 50, f.area());
    let paragraph = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", title)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

// Rect of the given percentage size centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
