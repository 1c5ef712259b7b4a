//! Terminal UI rendering with ratatui

use crate::game::{GameState, Snapshot};
use crate::menu::Menu;
use crate::settings::{KeyBindings, Settings};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the score and controls column
const SIDE_PANEL_WIDTH: u16 = 26;

/// Render the start menu
pub fn render_menu(frame: &mut Frame, menu: &Menu) {
    let area = frame.area();
    let menu_area = center_rect(area, 36, 14);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(menu_area);

    let title_lines = vec![
        Line::raw(""),
        Line::styled("B L O C K F A L L", Style::default().fg(Color::Cyan).bold()),
        Line::styled("a falling-block puzzle", Style::default().fg(Color::DarkGray)),
    ];
    let title = Paragraph::new(title_lines).alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);

    let mut lines = vec![Line::raw("")];
    for (i, item) in menu.items.iter().enumerate() {
        let (prefix, style) = if i == menu.selected {
            ("▶ ", Style::default().fg(Color::Yellow).bold())
        } else {
            ("  ", Style::default().fg(Color::White))
        };
        lines.push(Line::styled(format!("{}{}", prefix, item.label), style));
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        "↑↓ Select  Enter Confirm  Esc Quit",
        Style::default().fg(Color::DarkGray),
    ));

    let menu_text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(menu_text, inner);
}

/// Render the entire game screen from a snapshot
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings) {
    let area = frame.area();
    let board_width = snapshot.width as u16 * 2 + 2;
    let board_height = snapshot.height as u16 + 2;

    let game_area = center_rect(area, board_width + SIDE_PANEL_WIDTH, board_height);

    // Board | score + controls
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Length(SIDE_PANEL_WIDTH),
        ])
        .split(game_area);

    render_board(frame, main_layout[0], snapshot, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(9)])
        .split(main_layout[1]);

    render_stats(frame, right_layout[0], snapshot);
    render_controls(frame, right_layout[1], &settings.keys);

    match snapshot.state {
        GameState::Playing => {}
        GameState::GameOver => render_overlay(frame, area, "GAME OVER", Color::Red, snapshot.score),
        GameState::Quit => render_overlay(frame, area, "GAME QUIT", Color::Green, snapshot.score),
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Colors of every visible cell, locked blocks and the active piece combined
fn cell_colors(snapshot: &Snapshot) -> Vec<Vec<Option<Color>>> {
    let mut grid = vec![vec![None; snapshot.width]; snapshot.height];

    for &(x, y, color) in &snapshot.cells {
        grid[y][x] = Some(color);
    }

    if let Some(piece) = &snapshot.active {
        for (dx, dy) in piece.shape.cells() {
            let x = piece.x + dx as i32;
            let y = piece.y + dy as i32;
            // Cells above the top edge are not drawn
            if y >= 0 && (y as usize) < snapshot.height && x >= 0 && (x as usize) < snapshot.width {
                grid[y as usize][x as usize] = Some(piece.color);
            }
        }
    }

    grid
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings) {
    let (block_char, empty_char) = settings.visual.block_chars();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = cell_colors(snapshot)
        .into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|cell| match cell {
                    Some(color) => Span::styled(block_char, Style::default().fg(color)),
                    None => Span::styled(empty_char, Style::default().fg(Color::DarkGray)),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render score panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("SCORE ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}", snapshot.score), Style::default().fg(Color::Yellow).bold()),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("LINES ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}", snapshot.lines), Style::default().fg(Color::Green)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the controls help from the configured bindings
fn render_controls(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
    let block = Block::default()
        .title(" CONTROLS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let entries = [
        (&keys.move_left, "Move left"),
        (&keys.move_right, "Move right"),
        (&keys.rotate_cw, "Rotate"),
        (&keys.soft_drop, "Soft drop"),
        (&keys.hard_drop, "Hard drop"),
        (&keys.quit, "Quit game"),
    ];

    let lines: Vec<Line> = entries
        .iter()
        .map(|(bound, label)| {
            let names = if bound.is_empty() {
                "-".to_string()
            } else {
                bound.join("/")
            };
            Line::from(vec![
                Span::styled(format!("{:<8}", names), Style::default().fg(Color::Cyan)),
                Span::styled(*label, Style::default().fg(Color::White)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the end-of-game overlay
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, color: Color, score: u64) {
    let popup_area = center_rect(area, 26, 7);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(color).bold()),
        Line::styled(format!("Score: {}", score), Style::default().fg(Color::Yellow)),
        Line::raw(""),
        Line::styled("R restart", Style::default().fg(Color::Gray)),
        Line::styled("Enter/Esc menu", Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
