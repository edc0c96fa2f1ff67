use ratatui::{prelude::*, widgets::Paragraph};

use crate::models::QuestionBank;

use super::numbered;

const MAIN_MENU: [&str; 3] = ["Play Quiz", "View Leaderboard", "Exit"];

pub fn render_main(frame: &mut Frame, area: Rect) {
    let mut content = vec![heading("MAIN MENU")];
    content.extend(numbered(MAIN_MENU));
    frame.render_widget(Paragraph::new(content), area);
}

pub fn render_categories(frame: &mut Frame, area: Rect, bank: &QuestionBank) {
    let mut content = vec![heading("Available Categories")];
    content.extend(numbered(bank.categories().iter().map(|c| c.name.as_str())));
    content.push(back_hint());
    frame.render_widget(Paragraph::new(content), area);
}

pub fn render_difficulties(frame: &mut Frame, area: Rect, bank: &QuestionBank, category: &str) {
    let mut content = vec![heading(&format!("{}: Available Difficulties", category))];
    if let Some(category) = bank.category(category) {
        content.extend(numbered(category.difficulties.iter().map(|d| d.name.as_str())));
    }
    content.push(back_hint());
    frame.render_widget(Paragraph::new(content), area);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Cyan).bold(),
    ))
}

fn back_hint() -> Line<'static> {
    Line::from("Type a name or number, or 'back' to return to the main menu.".fg(Color::DarkGray))
}
