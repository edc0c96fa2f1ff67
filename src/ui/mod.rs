mod leaderboard;
mod menu;
mod quiz;
mod result;
mod welcome;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, NoticeKind, Screen};

const TITLE: &str = "QUIZ QUEST";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(4),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);

    match &app.screen {
        Screen::Nickname => welcome::render_nickname(frame, chunks[1]),
        Screen::Avatar { nickname } => welcome::render_avatar(frame, chunks[1], nickname),
        Screen::MainMenu => menu::render_main(frame, chunks[1]),
        Screen::Category => menu::render_categories(frame, chunks[1], app.bank()),
        Screen::Difficulty { category } => {
            menu::render_difficulties(frame, chunks[1], app.bank(), category)
        }
        Screen::Quiz {
            title,
            round,
            last_outcome,
        } => quiz::render(frame, chunks[1], title, round, last_outcome.as_ref()),
        Screen::RoundOver {
            title,
            result,
            last_outcome,
        } => result::render(frame, chunks[1], title, result, last_outcome.as_ref()),
        Screen::Leaderboard { entries } => leaderboard::render(frame, chunks[1], entries),
    }

    render_prompt(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        TITLE,
        Style::default().fg(Color::Cyan).bold(),
    )];
    if let Some(player) = app.player() {
        spans.push(Span::styled(
            format!("   {} {}", player.avatar(), player.nickname()),
            Style::default().fg(Color::Yellow),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn prompt_label(screen: &Screen) -> &'static str {
    match screen {
        Screen::Nickname => "Enter your nickname: ",
        Screen::Avatar { .. } => "Your choice (1-7 or Enter to skip): ",
        Screen::MainMenu => "Choose an option: ",
        Screen::Category => "Enter category: ",
        Screen::Difficulty { .. } => "Choose difficulty: ",
        Screen::Quiz { .. } => "Your answer (1-4): ",
        Screen::RoundOver { .. } | Screen::Leaderboard { .. } => "Press Enter to continue ",
    }
}

fn render_prompt(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(prompt_label(&app.screen), Style::default().fg(Color::White)),
            Span::styled(app.input(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ];

    match app.notice() {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Info => Color::Green,
                NoticeKind::Warning => Color::Red,
            };
            lines.push(Line::from(Span::styled(
                notice.text.as_str(),
                Style::default().fg(color),
            )));
        }
        None => lines.push(Line::from("")),
    }

    lines.push(Line::from(Span::styled(
        "enter submit  ·  ctrl-c quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

/// A numbered list: `  1. item`.
fn numbered<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<Line<'a>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            Line::from(vec![
                Span::styled(format!("  {}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(item, Style::default().fg(Color::Gray)),
            ])
        })
        .collect()
}
