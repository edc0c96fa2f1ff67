use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::engine::{AnswerOutcome, Round, STARTING_LIVES};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    round: &Round,
    last_outcome: Option<&AnswerOutcome>,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(area);

    render_status(frame, chunks[0], title, round);
    render_feedback(frame, chunks[1], last_outcome);

    let Some(question) = round.current_question() else {
        return;
    };
    render_question_text(frame, chunks[2], &question.text);
    render_options(frame, chunks[3], &question.options);
}

fn render_status(frame: &mut Frame, area: Rect, title: &str, round: &Round) {
    let lives_left = round.lives() as usize;
    let lives_lost = STARTING_LIVES as usize - lives_left;
    let hearts = format!("{}{}", "♥ ".repeat(lives_left), "· ".repeat(lives_lost));

    let line = Line::from(vec![
        Span::styled(title, Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("   {}/{}", round.question_number(), round.total_questions()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("   {}", hearts), Style::default().fg(Color::Red)),
        Span::styled(
            format!("  {} coins", round.score()),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, last_outcome: Option<&AnswerOutcome>) {
    let Some(outcome) = last_outcome else {
        return;
    };

    let color = match outcome {
        AnswerOutcome::Correct => Color::Green,
        AnswerOutcome::Wrong { .. } => Color::Red,
        AnswerOutcome::InvalidInput | AnswerOutcome::InvalidOption(_) => Color::Yellow,
    };
    let widget = Paragraph::new(outcome.message()).fg(color);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, options: &[String]) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", index + 1), Style::default().fg(Color::Cyan)),
            Span::styled(option.as_str(), Style::default().fg(Color::Gray)),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
