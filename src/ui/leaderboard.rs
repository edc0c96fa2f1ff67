use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::leaderboard::LeaderboardEntry;

pub fn render(frame: &mut Frame, area: Rect, entries: &[LeaderboardEntry]) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Leaderboard",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    if entries.is_empty() {
        lines.push(Line::from("No leaderboard data yet.".fg(Color::DarkGray)));
    }

    for (index, entry) in entries.iter().enumerate() {
        let color = if index == 0 { Color::Yellow } else { Color::Gray };
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", index + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}  ", entry.avatar), Style::default()),
            Span::styled(entry.nickname.as_str(), Style::default().fg(color).bold()),
            Span::styled(
                format!(" - {} coins", entry.score),
                Style::default().fg(color),
            ),
        ]));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
