use std::ops::Range;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, Feedback};
use crate::models::Examples;
use crate::session::{Prompt, Status};

const LABEL_WIDTH: usize = 17;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(prompt) = app.prompt() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(prompt.fields.len() as u16 + 2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app, prompt);
    render_strip(frame, chunks[1], app);
    render_prompt(frame, chunks[2], prompt);
    render_fields(frame, chunks[3], app, prompt);
    render_feedback(frame, chunks[4], app);
    render_controls(frame, chunks[5], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, prompt: &Prompt) {
    let score = Paragraph::new(format!(
        "{}  ·  score {}",
        app.shape().label(),
        app.score()
    ))
    .fg(Color::DarkGray);
    frame.render_widget(score, area);

    let progress = Paragraph::new(format!(
        "{}  ·  {}/{}",
        prompt.direction.label(),
        app.current_item_number(),
        app.total_items()
    ))
    .alignment(Alignment::Right)
    .fg(Color::DarkGray);
    frame.render_widget(progress, area);
}

/// The slice of item numbers that fits in the navigation strip, keeping
/// the current item near the middle.
fn strip_window(len: usize, current: usize, capacity: usize) -> Range<usize> {
    let capacity = capacity.max(1).min(len);
    let start = current
        .saturating_sub(capacity / 2)
        .min(len - capacity);
    start..start + capacity
}

fn render_strip(frame: &mut Frame, area: Rect, app: &App) {
    let len = app.total_items();
    let current = app.current_index().unwrap_or(0);
    let box_width = len.to_string().len() + 2;
    let window = strip_window(len, current, area.width as usize / box_width);

    let spans: Vec<Span> = window
        .map(|index| {
            let color = match app.statuses()[index] {
                Status::Correct => Color::Green,
                Status::Incorrect => Color::Red,
                Status::Unanswered => Color::DarkGray,
            };
            let style = if index == current {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(color)
            };
            Span::styled(format!("{:^width$}", index + 1, width = box_width), style)
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: &Prompt) {
    let mut lines = vec![Line::from(Span::styled(
        prompt.text.as_str(),
        Style::default().fg(Color::White).bold(),
    ))];
    if prompt.audio_eligible() {
        lines.push(Line::from("♪ ctrl-s to listen".fg(Color::DarkGray)));
    }

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_fields(frame: &mut Frame, area: Rect, app: &App, prompt: &Prompt) {
    let focused = app.focused_field();
    let locked = app.is_locked();

    let lines: Vec<Line> = prompt
        .fields
        .iter()
        .map(|&field| {
            let is_focused = Some(field) == focused;
            let marker = if is_focused { "> " } else { "  " };
            let label_style = if is_focused {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };

            let result = app.grade().and_then(|grade| grade.field(field));
            let value_style = match result {
                Some(r) if r.matched => Style::default().fg(Color::Green),
                Some(_) => Style::default().fg(Color::Red),
                None => Style::default().fg(Color::Yellow),
            };

            let mut spans = vec![
                Span::styled(marker, label_style),
                Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), label_style),
                Span::styled(app.input(field).to_string(), value_style),
            ];
            if is_focused && !locked {
                spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
            }
            match result {
                Some(r) if r.matched => spans.push(Span::styled("  ✓", Style::default().fg(Color::Green))),
                Some(r) => spans.push(Span::styled(
                    format!("  ✗ {}", r.expected),
                    Style::default().fg(Color::Red),
                )),
                None => {}
            }
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Answer ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    match app.feedback() {
        Some(Feedback::Correct) => lines.push(Line::from(Span::styled(
            "Correct!",
            Style::default().fg(Color::Green).bold(),
        ))),
        Some(Feedback::Incorrect) => lines.push(Line::from(Span::styled(
            "Check the fields in red.",
            Style::default().fg(Color::Red).bold(),
        ))),
        Some(Feedback::AlreadyAnswered) => lines.push(Line::from(Span::styled(
            "Already answered.",
            Style::default().fg(Color::DarkGray),
        ))),
        None => {}
    }

    if let Some(examples) = app.grade().and_then(|grade| grade.examples.as_ref()) {
        lines.push(Line::from(""));
        lines.extend(example_lines(examples));
    }

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn example_lines(examples: &Examples) -> Vec<Line<'_>> {
    [&examples.english, &examples.spanish]
        .into_iter()
        .flatten()
        .map(|sentence| Line::from(Span::styled(sentence.as_str(), Style::default().fg(Color::Gray).italic())))
        .collect()
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(input) = app.goto_input() {
        let widget = Paragraph::new(format!("go to item: {}_  (enter to jump · esc to cancel)", input))
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(widget, area);
        return;
    }

    let next = if app.is_last() { "results" } else { "next" };
    let text = format!(
        "tab field · enter check · ^n {} · ^p back · ^g go to · ^a hear field · ^o menu · esc quit",
        next
    );
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_window_fits_everything() {
        assert_eq!(strip_window(5, 2, 20), 0..5);
    }

    #[test]
    fn test_strip_window_centers_current() {
        assert_eq!(strip_window(100, 50, 10), 45..55);
        assert_eq!(strip_window(100, 0, 10), 0..10);
        assert_eq!(strip_window(100, 99, 10), 90..100);
    }

    #[test]
    fn test_strip_window_zero_capacity() {
        assert_eq!(strip_window(3, 1, 0), 1..2);
    }
}
