//! TUI rendering with ratatui
//!
//! The grid shows one row per word under its clue. Cells left of the diagonal
//! are the letters a word shares with the one above it and are tinted yellow.

use super::app::{App, AppMode, MessageStyle};
use crate::game::{Cell, Clock, MAX_HINTS, hints_remaining};
use crate::output::format_time;
use crate::storage::Store;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui<S: Store, C: Clock>(f: &mut Frame, app: &App<S, C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Mode prompt
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Grid
            Constraint::Percentage(40), // Info
        ])
        .split(chunks[1]);

    render_grid(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);
    render_prompt(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header<S: Store, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let puzzle = app.engine.puzzle();
    let header = Paragraph::new(format!(
        "🧩 CASCADE #{} - {}",
        puzzle.id(),
        puzzle.date().format("%B %-d, %Y")
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn render_grid<S: Store, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let matrix = app.engine.matrix();
    let validated = app.engine.validated();
    let mut lines = Vec::new();

    for (word, data) in app.engine.puzzle().words().iter().enumerate() {
        let solved = validated.get(word).copied().unwrap_or(false);
        let clue_style = if solved {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(
            format!("{}. {} ({})", word + 1, data.clue(), data.length()),
            clue_style,
        )));

        let mut cells = vec![Span::raw("   ")];
        for (letter, value) in matrix.row(word).iter().enumerate() {
            let cell = Cell::new(word, letter);
            let text = value.map_or_else(|| " _ ".to_string(), |b| format!(" {} ", char::from(b)));
            cells.push(Span::styled(text, cell_style(app, cell, solved)));
        }
        lines.push(Line::from(cells));
        lines.push(Line::default());
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Puzzle ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn cell_style<S: Store, C: Clock>(app: &App<S, C>, cell: Cell, solved: bool) -> Style {
    let mut style = if solved {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else if cell.is_priority() {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    };

    if app.mode == AppMode::Playing && app.cursor == cell {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    style
}

fn render_info_panel<S: Store, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Timer and streak
            Constraint::Length(3), // Hints gauge
            Constraint::Min(5),    // Messages
        ])
        .split(area);

    render_stats(f, app, chunks[0]);
    render_hints(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_stats<S: Store, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let solved = app.engine.validated().iter().filter(|&&v| v).count();
    let total = app.engine.puzzle().chain_length();

    let content = vec![
        Line::from(vec![
            Span::raw("Time:   "),
            Span::styled(
                format_time(app.engine.elapsed()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Words:  {solved}/{total}")),
        Line::from(format!("Streak: {}", app.streak.current())),
        Line::from(format!("Best:   {}", app.streak.best())),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Progress ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_hints<S: Store, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let remaining = hints_remaining(&app.engine);
    let percent = u16::from(remaining) * 100 / u16::from(MAX_HINTS);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Hints ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(percent)
        .label(format!("{remaining}/{MAX_HINTS} left"));

    f.render_widget(gauge, area);
}

fn render_messages<S: Store, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_prompt<S: Store, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let (title, color) = match app.mode {
        AppMode::Playing => (" Type letters | ←↑↓→ move | TAB next open cell ", Color::Yellow),
        AppMode::ConfirmGiveUp => (" Give up? Press 'y' to reveal, any other key to continue ", Color::Red),
        AppMode::Finished => (" 🎉 Finished! | 's' share | Ctrl+R play again | 'q' quit ", Color::Green),
    };

    let current = app
        .engine
        .puzzle()
        .words()
        .get(app.cursor.word)
        .map(|w| format!("Word {}: {}", app.cursor.word + 1, w.clue()))
        .unwrap_or_default();
    let content = if app.mode == AppMode::Playing {
        current
    } else {
        String::new()
    };

    let prompt = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(prompt, area);
}

fn render_status<S: Store, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let mode_text = match app.mode {
        AppMode::Playing => "Mode: Playing",
        AppMode::ConfirmGiveUp => "Mode: Confirm",
        AppMode::Finished => "Mode: Finished",
    };
    f.render_widget(Paragraph::new(mode_text).alignment(Alignment::Center), chunks[0]);

    let status_text = format!("Status: {:?}", app.engine.status());
    f.render_widget(Paragraph::new(status_text).alignment(Alignment::Center), chunks[1]);

    let hints_text = format!("Hints used: {}", app.engine.session().hints_used());
    f.render_widget(Paragraph::new(hints_text).alignment(Alignment::Center), chunks[2]);

    let help_text = match app.mode {
        AppMode::Playing => "?: Hint | !: Give up | Esc: Quit",
        AppMode::ConfirmGiveUp => "y: Confirm | n: Cancel",
        AppMode::Finished => "q: Quit | s: Share",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}
