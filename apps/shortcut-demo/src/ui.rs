//! UI rendering for the shortcut demo.

use crate::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let state = app.state.borrow();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let focused = |focus: Focus| {
        if state.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    let items: Vec<ListItem> = state
        .messages
        .iter()
        .map(|m| ListItem::new(m.as_str()))
        .collect();
    let log = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(focused(Focus::Log)),
    );
    f.render_widget(log, chunks[0]);

    let input = Paragraph::new(state.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Input ")
            .border_style(focused(Focus::Input)),
    );
    f.render_widget(input, chunks[1]);

    f.render_widget(
        Paragraph::new(state.status.as_str()).style(Style::default().fg(Color::Cyan)),
        chunks[2],
    );

    let help = ["quit", "save", "submit", "clear", "fail"]
        .iter()
        .map(|key| format!("{}: {}", app.shortcut_label(key), key))
        .collect::<Vec<_>>()
        .join("  ");
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}
