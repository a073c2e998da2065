use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::session::{HitMap, Region, Screen, View};

const MIN_BUTTON_WIDTH: u16 = 24;
const BUTTON_HEIGHT: u16 = 3;

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Named style tokens instead of ad-hoc color lookups, so a bad style
/// reference is a compile error.
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub prompt: Style,
    pub option: Style,
    pub option_border: Style,
    pub score: Style,
    pub feedback_correct: Style,
    pub feedback_wrong: Style,
    pub hint: Style,
    pub cursor: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Self {
            title: bold.fg(Color::Cyan),
            prompt: bold,
            option: Style::default(),
            option_border: Style::default().fg(Color::Green),
            score: bold.fg(Color::Yellow),
            feedback_correct: bold.fg(Color::Green),
            feedback_wrong: bold.fg(Color::Red),
            hint: Style::default().add_modifier(Modifier::DIM),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// Draws one frame and reports the clickable regions it produced, so the
/// session can resolve pointer presses against what is actually on screen.
pub fn draw(f: &mut Frame, view: &View, theme: &Theme) -> HitMap {
    match view.screen {
        Screen::Username => draw_username(f, view, theme),
        Screen::Start => draw_start(f, view, theme),
        Screen::Game => draw_game(f, view, theme),
        Screen::HighScores => draw_high_scores(f, view, theme),
        Screen::GameOver => draw_game_over(f, view, theme),
    }
}

fn centered_horizontally(row: Rect, width: u16) -> Rect {
    let width = width.min(row.width);
    Rect {
        x: row.x + (row.width - width) / 2,
        y: row.y,
        width,
        height: row.height,
    }
}

fn draw_username(f: &mut Frame, view: &View, theme: &Theme) -> HitMap {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(f.area());

    let title = Paragraph::new(Span::styled("kelime — Turkish flashcards", theme.title))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let instruction = Paragraph::new(Span::styled(
        "Type your name and press Enter",
        theme.hint,
    ))
    .alignment(Alignment::Center);
    f.render_widget(instruction, chunks[3]);

    let cursor = if view.cursor_visible { "█" } else { " " };
    let name = Paragraph::new(Line::from(vec![
        Span::styled(view.player_name.clone(), theme.prompt),
        Span::styled(cursor, theme.cursor),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(name, chunks[5]);

    HitMap::default()
}

fn draw_start(f: &mut Frame, view: &View, theme: &Theme) -> HitMap {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(f.area());

    let title = Paragraph::new(Span::styled("kelime — Turkish flashcards", theme.title))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let welcome = Paragraph::new(Span::styled(
        format!("Welcome, {}!", view.player_name),
        theme.prompt,
    ))
    .alignment(Alignment::Center);
    f.render_widget(welcome, chunks[3]);

    let button_rect = centered_horizontally(chunks[5], MIN_BUTTON_WIDTH);
    let button = Paragraph::new("Start")
        .alignment(Alignment::Center)
        .style(theme.option)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.option_border),
        );
    f.render_widget(button, button_rect);

    let hint = Paragraph::new(Span::styled(
        "enter/click: start   h: high scores   esc: quit",
        theme.hint,
    ))
    .alignment(Alignment::Center);
    f.render_widget(hint, chunks[7]);

    HitMap {
        confirm: Some(button_rect.into()),
        options: Vec::new(),
    }
}

fn draw_game(f: &mut Frame, view: &View, theme: &Theme) -> HitMap {
    let option_rows = view.options.len() as u16 * BUTTON_HEIGHT;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(4)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(option_rows),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    let status = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let round = match view.rounds {
        Some(total) => format!("Round {}/{}", view.round, total),
        None => format!("Round {}", view.round),
    };
    f.render_widget(Paragraph::new(Span::styled(round, theme.hint)), status[0]);

    let score = Paragraph::new(Span::styled(format!("Score: {}", view.score), theme.score))
        .alignment(Alignment::Right);
    f.render_widget(score, status[1]);

    if let Some(word) = &view.prompt {
        let prompt = Paragraph::new(Span::styled(format!("Translate: {}", word), theme.prompt))
            .alignment(Alignment::Center);
        f.render_widget(prompt, chunks[2]);
    }

    let mut hit_map = HitMap::default();

    if !view.options.is_empty() {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(BUTTON_HEIGHT); view.options.len()])
            .split(chunks[4]);

        let widest = view
            .options
            .iter()
            .map(|o| o.as_str().width() as u16)
            .max()
            .unwrap_or(0);
        let button_width = (widest + 8).max(MIN_BUTTON_WIDTH);

        for (i, (option, row)) in view.options.iter().zip(rows.iter()).enumerate() {
            let rect = centered_horizontally(*row, button_width);
            let button = Paragraph::new(format!("{}) {}", i + 1, option))
                .alignment(Alignment::Center)
                .style(theme.option)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(theme.option_border),
                );
            f.render_widget(button, rect);
            hit_map.options.push(rect.into());
        }
    }

    if let Some((text, correct)) = &view.feedback {
        let style = if *correct {
            theme.feedback_correct
        } else {
            theme.feedback_wrong
        };
        let feedback =
            Paragraph::new(Span::styled(text.clone(), style)).alignment(Alignment::Center);
        f.render_widget(feedback, chunks[6]);
    }

    let hint = Paragraph::new(Span::styled("1-4 or click: answer   esc: quit", theme.hint))
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[8]);

    hit_map
}

fn draw_high_scores(f: &mut Frame, view: &View, theme: &Theme) -> HitMap {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .vertical_margin(2)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title =
        Paragraph::new(Span::styled("High Scores", theme.title)).alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let lines: Vec<Line> = if view.top_scores.is_empty() {
        vec![Line::from(Span::styled(
            "No scores yet — finish a game!",
            theme.hint,
        ))]
    } else {
        view.top_scores
            .iter()
            .enumerate()
            .map(|(i, (name, score))| {
                Line::from(Span::styled(
                    format!("{:>2}. {:<15} {:>4}", i + 1, name, score),
                    theme.option,
                ))
            })
            .collect()
    };
    let list = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(list, chunks[2]);

    let hint = Paragraph::new(Span::styled("esc: back", theme.hint)).alignment(Alignment::Center);
    f.render_widget(hint, chunks[3]);

    HitMap::default()
}

fn draw_game_over(f: &mut Frame, view: &View, theme: &Theme) -> HitMap {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(f.area());

    let title = Paragraph::new(Span::styled("Game Over!", theme.title)).alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let final_score = Paragraph::new(Span::styled(
        format!("Final score: {}", view.score),
        theme.score,
    ))
    .alignment(Alignment::Center);
    f.render_widget(final_score, chunks[3]);

    if let Some(best) = view.best {
        let best = Paragraph::new(Span::styled(
            format!("{}'s best: {}", view.player_name, best),
            theme.hint,
        ))
        .alignment(Alignment::Center);
        f.render_widget(best, chunks[4]);
    }

    let button_rect = centered_horizontally(chunks[6], MIN_BUTTON_WIDTH);
    let button = Paragraph::new("Play again")
        .alignment(Alignment::Center)
        .style(theme.option)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.option_border),
        );
    f.render_widget(button, button_rect);

    let hint = Paragraph::new(Span::styled(
        "enter/click: play again   h: high scores   esc: quit",
        theme.hint,
    ))
    .alignment(Alignment::Center);
    f.render_widget(hint, chunks[8]);

    HitMap {
        confirm: Some(button_rect.into()),
        options: Vec::new(),
    }
}
