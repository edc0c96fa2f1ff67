use ratatui::{prelude::*, widgets::Paragraph};

use crate::models::AVATAR_CHOICES;

use super::numbered;

pub fn render_nickname(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to Quiz Quest!",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Answer questions, earn coins, climb the leaderboard.".fg(Color::DarkGray)),
        Line::from("Three wrong answers and your round is over.".fg(Color::DarkGray)),
    ];

    frame.render_widget(Paragraph::new(content), area);
}

pub fn render_avatar(frame: &mut Frame, area: Rect, nickname: &str) {
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Hi {}!", nickname),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Choose an avatar by typing the number (or press Enter to skip):"),
    ];
    content.extend(numbered(AVATAR_CHOICES));

    frame.render_widget(Paragraph::new(content), area);
}
