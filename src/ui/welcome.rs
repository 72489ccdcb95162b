use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Rows of the item set picker, borders excluded.
const PICKER_ROWS: usize = 8;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let picker_height = if app.choices().is_empty() {
        0
    } else {
        app.choices().len().min(PICKER_ROWS) as u16 + 2
    };

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Length(picker_height),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let summary = format!("{} items · {}", app.total_items(), app.shape().label());

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "VERB DRILL",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(app.source_label().fg(Color::Gray)),
        Line::from(Span::styled(summary, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  esc to quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);

    if !app.choices().is_empty() {
        render_picker(frame, chunks[2], app);
    }

    if let Some(status) = app.status() {
        let status = Paragraph::new(status.fg(Color::Yellow)).alignment(Alignment::Center);
        frame.render_widget(status, chunks[3]);
    }
}

fn render_picker(frame: &mut Frame, area: Rect, app: &App) {
    let selected = app.selected_choice();
    let first = selected.saturating_sub(PICKER_ROWS - 1);

    let lines: Vec<Line> = app
        .choices()
        .iter()
        .enumerate()
        .skip(first)
        .take(PICKER_ROWS)
        .map(|(index, choice)| {
            if index == selected {
                Line::from(Span::styled(
                    format!("▸ {}", choice.label),
                    Style::default().fg(Color::Cyan).bold(),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", choice.label),
                    Style::default().fg(Color::Gray),
                ))
            }
        })
        .collect();

    let picker = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" ↑↓ choose · l load ".fg(Color::DarkGray)),
    );

    frame.render_widget(picker, area);
}
