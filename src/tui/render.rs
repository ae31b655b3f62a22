//! UI rendering functions for the TUI.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use show_browser::view::Mode;

use super::state::App;

/// Draw the UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // List + details
            Constraint::Length(3), // Footer
        ])
        .split(size);

    draw_header(frame, app, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    draw_main(frame, app, chunks[2]);
    draw_footer(frame, app, chunks[3]);

    if app.show_help {
        draw_help_modal(frame);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let view = match app.mode {
        Mode::Catalog => "Shows",
        Mode::Detail => "Episodes",
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "show-browser",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(view, Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.search_input.is_empty() {
        (
            "Type to filter...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.search_input.clone(), Style::default().fg(Color::White))
    };

    let search = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Search"),
    );

    frame.render_widget(search, area);
}

fn draw_main(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let items: Vec<ListItem> = app
        .rows
        .iter()
        .map(|row| ListItem::new(row.title.as_str()))
        .collect();

    let title = format!("Displaying {}/{}", app.count.0, app.count.1);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], &mut app.list_state);

    let details = app
        .selected_row()
        .map(|row| row.details.clone())
        .unwrap_or_default();

    let details_widget = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });

    frame.render_widget(details_widget, chunks[1]);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer = if app.status_message.is_empty() {
        let help_text = match app.mode {
            Mode::Catalog => "[↑↓] navigate  [Enter] episodes  [Tab] only this  [Ctrl+A] all  [F1] help  [Ctrl+Q] quit",
            Mode::Detail => "[↑↓] navigate  [Enter] only this  [Ctrl+A] all  [Esc] back  [F1] help  [Ctrl+Q] quit",
        };
        Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.status_message.as_str()).style(Style::default().fg(Color::Yellow))
    };

    frame.render_widget(footer.block(Block::default().borders(Borders::ALL)), area);
}

fn draw_help_modal(frame: &mut Frame) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from("Typing filters the current list"),
        Line::from("Up/Down    move the cursor"),
        Line::from("Enter      open show / show only this episode"),
        Line::from("Tab        show only the highlighted show"),
        Line::from("Ctrl+A     show everything again"),
        Line::from("Esc        clear search, then back to all shows"),
        Line::from("Ctrl+Q     quit"),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Help (Esc to close)"),
    );

    frame.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
