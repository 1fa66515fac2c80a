// One repository row, shared by the search and favorites screens
use chrono::{DateTime, Datelike, Utc};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};
use repostar_core::{Favorites, RepositoryRecord};

/// "January 5th 2024"
pub fn format_date(date: &DateTime<Utc>) -> String {
    let day = date.day();
    format!(
        "{} {}{} {}",
        date.format("%B"),
        day,
        ordinal_suffix(day),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

pub fn toggle_label(is_favorite: bool) -> &'static str {
    if is_favorite {
        "Unfavorite"
    } else {
        "Favorite"
    }
}

/// Activate the row's toggle. Returns the new membership.
pub fn activate_toggle(record: &RepositoryRecord, favorites: &mut Favorites) -> bool {
    favorites.toggle(record)
}

/// Text lines for one record, ending with a blank spacer line
pub fn item_lines(record: &RepositoryRecord, is_favorite: bool) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(Span::styled(
        record.name.clone(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))];

    if let Some(desc) = &record.description {
        lines.push(Line::from(desc.clone()));
    }

    lines.push(Line::from(vec![
        Span::styled("★ Stars: ", Style::default().fg(Color::Yellow)),
        Span::raw(record.stars.to_string()),
        Span::styled("   Forks: ", label),
        Span::raw(record.forks.to_string()),
        Span::styled("   Language: ", label),
        Span::raw(record.language_label().to_string()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Created: ", label),
        Span::raw(format_date(&record.created_at)),
        Span::styled("   Last Update: ", label),
        Span::raw(format_date(&record.updated_at)),
    ]));
    lines.push(Line::from(Span::styled(
        format!("avatar: {}", record.owner_avatar_url),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
    )));

    let toggle_style = if is_favorite {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue)
    };
    lines.push(Line::from(Span::styled(
        format!("[ {} ]", toggle_label(is_favorite)),
        toggle_style,
    )));
    lines.push(Line::default());

    lines
}

/// Rows the item occupies in a list
pub fn item_height(record: &RepositoryRecord) -> usize {
    // name, stats, dates, avatar, toggle, spacer
    6 + usize::from(record.description.is_some())
}

pub fn list_item(record: &RepositoryRecord, favorites: &Favorites) -> ListItem<'static> {
    ListItem::new(item_lines(record, favorites.contains(record.id)))
}
