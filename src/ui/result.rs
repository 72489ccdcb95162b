use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use super::grade_color;
use crate::app::App;
use crate::models::{Field, Item};
use crate::session::Status;

const PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], app);
    render_item_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn render_score_summary(frame: &mut Frame, area: Rect, app: &App) {
    let percentage = app.percentage_score();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({}%)", app.score(), app.total_items(), percentage),
            Style::default().fg(grade_color(percentage)).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_item_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .session()
        .items()
        .iter()
        .zip(app.statuses())
        .enumerate()
        .map(|(index, (item, status))| {
            let (symbol, color) = match status {
                Status::Correct => ("+", Color::Green),
                Status::Incorrect => ("-", Color::Red),
                Status::Unanswered => ("·", Color::DarkGray),
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:3}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(truncate(&preview(item)), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.result_scroll() as u16, 0));
    frame.render_widget(widget, area);
}

fn preview(item: &Item) -> String {
    format!(
        "{}  ·  {}",
        item.ground_truth(Field::Base),
        item.ground_truth(Field::Spanish)
    )
}

fn truncate(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > PREVIEW_LENGTH {
        let truncated: String = text.chars().take(PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r restart  ·  m menu  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
