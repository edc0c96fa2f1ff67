use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::engine::{AnswerOutcome, COINS_PER_CORRECT, RoundResult, RoundState};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    result: &RoundResult,
    last_outcome: Option<&AnswerOutcome>,
) {
    let correct = result.score / COINS_PER_CORRECT;
    let (headline, color) = match result.state {
        RoundState::LivesExhausted => ("You've lost all your lives!", Color::Red),
        _ => ("Quiz complete!", get_grade_color(correct, result.questions_answered)),
    };

    let mut content = vec![Line::from("")];
    if let Some(outcome) = last_outcome {
        content.push(Line::from(Span::styled(
            outcome.message(),
            Style::default().fg(Color::DarkGray),
        )));
        content.push(Line::from(""));
    }
    content.extend([
        Line::from(Span::styled(title, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(headline, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("You scored {} coins.", result.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(Span::styled(
            format!(
                "{} of {} answered correctly  ·  {} lives left",
                correct, result.questions_answered, result.lives_left
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ]);

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn get_grade_color(correct: u32, answered: usize) -> Color {
    let percentage = if answered > 0 {
        correct as usize * 100 / answered
    } else {
        0
    };

    match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}
