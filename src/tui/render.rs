//! UI rendering functions for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::state::ViewState;
use super::types::{ContentKind, Focus, Listing};

/// Draw the UI.
pub fn draw(frame: &mut Frame, state: &mut ViewState) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Search status
            Constraint::Min(0),    // Content (selector + cards)
            Constraint::Length(3), // Footer
        ])
        .split(size);

    draw_header(frame, state, chunks[0]);
    draw_search_bar(frame, state, chunks[1]);
    draw_status(frame, state, chunks[2]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(32), // Selector (fixed width)
            Constraint::Min(0),     // Cards
        ])
        .split(chunks[3]);

    draw_selector(frame, state, content_chunks[0]);

    if state.loading {
        draw_loading(frame, content_chunks[1]);
    } else {
        match state.content {
            ContentKind::Shows => draw_cards(
                frame,
                content_chunks[1],
                &state.shows,
                &mut state.list_state,
                "Shows",
                "Press Enter to view episodes",
                state.focus == Focus::Main,
            ),
            ContentKind::Episodes => draw_cards(
                frame,
                content_chunks[1],
                &state.episodes,
                &mut state.list_state,
                "Episodes",
                "Press Backspace to return to shows",
                state.focus == Focus::Main,
            ),
        }
    }

    draw_footer(frame, state, chunks[4]);

    if let Some(error) = &state.error {
        draw_error_popup(frame, error);
    }

    if state.show_help {
        draw_help_modal(frame);
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

fn draw_header(frame: &mut Frame, state: &ViewState, area: Rect) {
    let view_label = match state.content {
        ContentKind::Shows => "[shows]",
        ContentKind::Episodes => "[episodes]",
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "show-browser",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(view_label, Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(
            "Data sourced from TVMaze.com",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_search_bar(frame: &mut Frame, state: &ViewState, area: Rect) {
    let search_text = if state.search_input.is_empty() && !state.search_focused {
        "Press '/' to search..."
    } else {
        &state.search_input
    };

    let search = Paragraph::new(search_text)
        .style(if state.search_focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search")
                .border_style(border_style(state.search_focused)),
        );

    frame.render_widget(search, area);

    if state.search_focused {
        frame.set_cursor_position(search_cursor(area, &state.search_input));
    }
}

/// Cursor position after the last typed character, kept inside the borders.
fn search_cursor(area: Rect, input: &str) -> (u16, u16) {
    let last_column = area.width.saturating_sub(3);
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    (area.x + 1 + typed.min(last_column), area.y + 1)
}

fn draw_status(frame: &mut Frame, state: &ViewState, area: Rect) {
    let status = Paragraph::new(format!(" {}", state.status))
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(status, area);
}

fn draw_selector(frame: &mut Frame, state: &mut ViewState, area: Rect) {
    let title = match state.content {
        ContentKind::Shows => "Select a show",
        ContentKind::Episodes => "Select an episode",
    };

    let items: Vec<ListItem> = state
        .options()
        .iter()
        .map(|o| ListItem::new(o.label.clone()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style(state.focus == Focus::Selector)),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state.selector_state);
}

/// Card list plus a details pane for the highlighted card.
fn draw_cards<T: Listing>(
    frame: &mut Frame,
    area: Rect,
    items: &[T],
    list_state: &mut ListState,
    title: &str,
    hint: &str,
    focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let rows: Vec<ListItem> = items.iter().map(|i| ListItem::new(i.heading())).collect();

    let list = List::new(rows)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ({})", title, items.len()))
                .border_style(border_style(focused)),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], list_state);

    let details = match list_state.selected().and_then(|i| items.get(i)) {
        Some(item) => {
            let mut lines = vec![item.heading(), String::new()];
            lines.extend(item.detail_lines());
            lines.push(String::new());
            lines.push(hint.to_string());
            lines.join("\n")
        }
        None => "Nothing to show".to_string(),
    };

    let details_widget = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });

    frame.render_widget(details_widget, chunks[1]);
}

fn draw_loading(frame: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Loading…")
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Loading"));

    frame.render_widget(loading, area);
}

fn draw_footer(frame: &mut Frame, state: &ViewState, area: Rect) {
    let help_text = if state.search_focused {
        "[type] filter  [Enter] done  [Esc] clear"
    } else if state.error.is_some() {
        "[r] retry  [q] quit"
    } else {
        match state.content {
            ContentKind::Shows => {
                "[/] search  [Tab] switch  [↑↓] navigate  [Enter] open  [?] help  [q] quit"
            }
            ContentKind::Episodes => {
                "[/] search  [Tab] switch  [↑↓] navigate  [Bksp] back  [?] help  [q] quit"
            }
        }
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_error_popup(frame: &mut Frame, error: &str) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(format!("{}\n\n[r] retry  [q] quit", error))
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(popup, area);
}

fn draw_help_modal(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let content = "\
Global Commands
───────────────
  ?           Show/hide this help
  Ctrl+C      Force quit
  /           Focus search bar
  Tab         Switch between selector and cards
  q           Quit

Search Bar
──────────
  (Type)      Filter by name, summary or genre
  Enter       Keep filter, leave search bar
  Esc         Clear filter

Navigation
──────────
  j / ↓       Move down
  k / ↑       Move up
  Enter       Open show / pick selector entry
  Backspace   Back to show list

Press ? to close";

    let help_text = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help_text, area);
}

/// Helper function to create a centered rect.
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
