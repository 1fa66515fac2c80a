// UI rendering logic
use crate::{
    app::{App, InputMode},
    item::list_item,
    nav::Tab,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};
use repostar_core::SearchState;

const EMPTY_RESULTS: &str = "No repositories found. Start searching!";
const EMPTY_FAVORITES: &str = "No favorites yet. Press f on a repository to add one.";
const SKELETON_ROWS: usize = 5;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Active screen
            Constraint::Length(1), // Status bar
            Constraint::Length(3), // Tab bar
        ])
        .split(frame.area());

    match app.tab {
        Tab::Home => render_search_screen(frame, app, chunks[0]),
        Tab::Favorites => render_favorites_screen(frame, app, chunks[0]),
    }

    render_status_bar(frame, app, chunks[1]);
    render_tab_bar(frame, app, chunks[2]);
}

fn render_search_screen(frame: &mut Frame, app: &mut App, area: Rect) {
    let content_area = if app.search_bar_visible() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);
        render_search_input(frame, app, chunks[0]);
        chunks[1]
    } else {
        area
    };

    if app.session.state() == SearchState::Loading {
        render_skeleton(frame, content_area);
    } else if app.results.is_empty() {
        render_empty(frame, EMPTY_RESULTS, content_area);
    } else {
        let items: Vec<ListItem> = app
            .results
            .list()
            .iter()
            .map(|r| list_item(r, &app.favorites))
            .collect();
        let title = match app.session.last_query() {
            Some(q) => format!(" Results for {:?} ({}) ", q, app.results.len()),
            None => format!(" Results ({}) ", app.results.len()),
        };
        frame.render_stateful_widget(
            result_list(items, title),
            content_area,
            &mut app.results_state,
        );
    }
}

fn render_favorites_screen(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.favorites.is_empty() {
        render_empty(frame, EMPTY_FAVORITES, area);
        return;
    }

    let items: Vec<ListItem> = app
        .favorites
        .list()
        .iter()
        .map(|r| list_item(r, &app.favorites))
        .collect();
    let title = format!(" Favorites ({}) ", app.favorites.len());
    frame.render_stateful_widget(result_list(items, title), area, &mut app.favorites_state);
}

fn result_list(items: Vec<ListItem<'static>>, title: String) -> List<'static> {
    List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Rgb(40, 44, 52)))
        .highlight_symbol("▌ ")
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Searching;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = if app.search_input.is_empty() && !editing {
        Line::from(Span::styled(
            "Search Repositories",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(app.search_input.as_str())
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" 🔍 Search "),
    );
    frame.render_widget(input, area);

    if editing {
        frame.set_cursor_position((cursor_x(area, &app.search_input), area.y + 1));
    }
}

/// Column just past the typed text, measured in display cells, kept inside the box
fn cursor_x(area: Rect, input: &str) -> u16 {
    let width = u16::try_from(Line::from(input).width()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(width)
        .min(area.right().saturating_sub(2))
}

fn render_skeleton(frame: &mut Frame, area: Rect) {
    let bar = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::with_capacity(SKELETON_ROWS * 3);
    for _ in 0..SKELETON_ROWS {
        lines.push(Line::from(Span::styled("██  ▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇", bar)));
        lines.push(Line::from(Span::styled("    ▇▇▇▇▇▇▇▇▇▇▇▇▇", bar)));
        lines.push(Line::default());
    }

    let skeleton = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Loading… "),
    );
    frame.render_widget(skeleton, area);
}

fn render_empty(frame: &mut Frame, message: &str, area: Rect) {
    let text = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(text, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(notice) = app.session.current_notice() {
        Line::from(Span::styled(
            format!(" ⚠ {}", notice.message),
            Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        let hints = match app.input_mode {
            InputMode::Searching => " Type to search · Esc: done · Tab: favorites",
            InputMode::Normal => {
                " /: search · j/k: move · f: favorite · Enter: open · Tab: switch · q: quit"
            }
        };
        Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|t| Line::from(t.label(app.tab)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider(" │ ");
    frame.render_widget(tabs, area);
}
