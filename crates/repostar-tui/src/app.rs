// TUI application state and event handling
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use repostar_core::{
    config::UiConfig, Completion, Favorites, RepositoryRecord, SearchOutcome, SearchResults,
    SearchSession, Ticket,
};

use crate::item::{activate_toggle, item_height};
use crate::nav::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Navigating results
    Searching, // Typing in search box
}

/// What the event loop has to do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Search text changed; feed it to the debouncer
    QueryChanged(String),
    /// Open a repository page in the browser
    Open(String),
    Quit,
}

/// Search box is shown while the list is scrolled at most `threshold` rows
pub fn search_bar_visible(scrolled_rows: u32, threshold: u32) -> bool {
    scrolled_rows <= threshold
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub tab: Tab,
    pub search_input: String,
    pub results: SearchResults,
    pub favorites: Favorites,
    pub session: SearchSession,
    pub results_state: ListState,
    pub favorites_state: ListState,
    pub hide_search_after_rows: u32,
}

impl App {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Searching,
            tab: Tab::Home,
            search_input: String::new(),
            results: SearchResults::new(),
            favorites: Favorites::new(),
            session: SearchSession::new(),
            results_state: ListState::default(),
            favorites_state: ListState::default(),
            hide_search_after_rows: ui.hide_search_after_rows,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_search_mode(&mut self) {
        self.tab = Tab::Home;
        self.input_mode = InputMode::Searching;
        // Scroll back up so the search box is actually on screen
        *self.results_state.offset_mut() = 0;
        if !self.results.is_empty() {
            self.results_state.select(Some(0));
        }
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.input_mode = InputMode::Normal;
        if tab == Tab::Favorites {
            self.clamp_favorites_selection();
        }
    }

    /// Rows of the result list scrolled out of view above the top edge
    pub fn scrolled_rows(&self) -> u32 {
        let offset = self.results_state.offset().min(self.results.len());
        self.results.list()[..offset]
            .iter()
            .map(|r| item_height(r) as u32)
            .sum()
    }

    pub fn search_bar_visible(&self) -> bool {
        search_bar_visible(self.scrolled_rows(), self.hide_search_after_rows)
    }

    fn visible_len(&self) -> usize {
        match self.tab {
            Tab::Home => self.results.len(),
            Tab::Favorites => self.favorites.len(),
        }
    }

    fn current_state(&mut self) -> &mut ListState {
        match self.tab {
            Tab::Home => &mut self.results_state,
            Tab::Favorites => &mut self.favorites_state,
        }
    }

    pub fn next_item(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let state = self.current_state();
        let next = state.selected().map_or(0, |i| (i + 1).min(len - 1));
        state.select(Some(next));
    }

    pub fn previous_item(&mut self) {
        if self.visible_len() == 0 {
            return;
        }
        let state = self.current_state();
        let prev = state.selected().map_or(0, |i| i.saturating_sub(1));
        state.select(Some(prev));
    }

    /// Highlighted row, if one is on screen. None while the skeleton is up.
    pub fn selected_record(&self) -> Option<&RepositoryRecord> {
        match self.tab {
            Tab::Home if self.session.is_loading() => None,
            Tab::Home => self.results_state.selected().and_then(|i| self.results.get(i)),
            Tab::Favorites => self
                .favorites_state
                .selected()
                .and_then(|i| self.favorites.list().get(i)),
        }
    }

    /// Flip the favorite toggle of the highlighted row
    pub fn toggle_selected_favorite(&mut self) {
        let Some(record) = self.selected_record().cloned() else {
            return;
        };
        activate_toggle(&record, &mut self.favorites);
        self.clamp_favorites_selection();
    }

    fn clamp_favorites_selection(&mut self) {
        let len = self.favorites.len();
        if len == 0 {
            self.favorites_state.select(None);
        } else {
            let i = self.favorites_state.selected().unwrap_or(0).min(len - 1);
            self.favorites_state.select(Some(i));
        }
    }

    /// Start a search for a debounced query
    pub fn begin_search(&mut self, query: &str) -> Ticket {
        self.session.begin(query)
    }

    /// Apply a finished search to the results store
    pub fn complete_search(&mut self, outcome: SearchOutcome) -> Completion {
        let completion = self.session.complete(outcome, &mut self.results);
        if let Completion::Applied(count) = completion {
            *self.results_state.offset_mut() = 0;
            self.results_state.select(if count == 0 { None } else { Some(0) });
        }
        completion
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Notices are transient: any key clears them
        self.session.dismiss_notice();

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Searching => match key.code {
                KeyCode::Char(c) if (key.modifiers - KeyModifiers::SHIFT).is_empty() => {
                    self.search_input.push(c);
                    Action::QueryChanged(self.search_input.clone())
                }
                KeyCode::Backspace => {
                    self.search_input.pop();
                    Action::QueryChanged(self.search_input.clone())
                }
                KeyCode::Esc | KeyCode::Enter | KeyCode::Down => {
                    self.enter_normal_mode();
                    Action::None
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    self.switch_tab(Tab::Favorites);
                    Action::None
                }
                _ => Action::None,
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => {
                    self.quit();
                    Action::Quit
                }
                KeyCode::Char('/') => {
                    self.enter_search_mode();
                    Action::None
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    self.switch_tab(self.tab.next());
                    Action::None
                }
                KeyCode::Char('1') => {
                    self.switch_tab(Tab::Home);
                    Action::None
                }
                KeyCode::Char('2') => {
                    self.switch_tab(Tab::Favorites);
                    Action::None
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.next_item();
                    Action::None
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.previous_item();
                    Action::None
                }
                KeyCode::Char('f') | KeyCode::Char(' ') => {
                    self.toggle_selected_favorite();
                    Action::None
                }
                KeyCode::Enter => match self.selected_record().and_then(|r| r.html_url.clone()) {
                    Some(url) => Action::Open(url),
                    None => Action::None,
                },
                _ => Action::None,
            },
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&UiConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use repostar_core::RepoId;

    fn record(id: u64, name: &str) -> RepositoryRecord {
        RepositoryRecord {
            id: RepoId(id),
            name: name.to_string(),
            description: None,
            owner_avatar_url: String::new(),
            html_url: Some(format!("https://github.com/x/{}", name)),
            stars: 1,
            forks: 0,
            language: None,
            created_at: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2021, 1, 2, 0, 0, 0).unwrap(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_app(records: Vec<RepositoryRecord>) -> App {
        let mut app = App::default();
        let ticket = app.begin_search("seed");
        app.complete_search(SearchOutcome {
            seq: ticket.seq,
            query: ticket.query,
            result: Ok(records),
        });
        app.enter_normal_mode();
        app
    }

    #[test]
    fn test_search_bar_threshold() {
        assert!(search_bar_visible(0, 50));
        assert!(search_bar_visible(50, 50));
        assert!(!search_bar_visible(51, 50));
    }

    #[test]
    fn test_typing_emits_query_changes() {
        let mut app = App::default();
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), Action::QueryChanged("r".into()));
        assert_eq!(app.handle_key(key(KeyCode::Char('s'))), Action::QueryChanged("rs".into()));
        assert_eq!(app.handle_key(key(KeyCode::Backspace)), Action::QueryChanged("r".into()));
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Action::None);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_toggle_from_results_then_unfavorite_from_favorites_tab() {
        let mut app = loaded_app(vec![record(1, "one"), record(2, "two")]);

        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('f')));
        assert!(app.favorites.contains(RepoId(2)));

        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.tab, Tab::Favorites);
        assert_eq!(app.selected_record().map(|r| r.id), Some(RepoId(2)));

        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.favorites.is_empty());
        assert_eq!(app.favorites_state.selected(), None);

        // Results are a separate collection
        assert_eq!(app.results.len(), 2);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = loaded_app(vec![record(1, "one"), record(2, "two")]);
        for _ in 0..5 {
            app.next_item();
        }
        assert_eq!(app.results_state.selected(), Some(1));
        for _ in 0..5 {
            app.previous_item();
        }
        assert_eq!(app.results_state.selected(), Some(0));
    }

    #[test]
    fn test_enter_opens_selected_repo() {
        let mut app = loaded_app(vec![record(1, "one")]);
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            Action::Open("https://github.com/x/one".into())
        );
    }

    #[test]
    fn test_scrolled_rows_follows_list_offset() {
        let mut app = loaded_app((1..=20).map(|i| record(i, "r")).collect());
        assert!(app.search_bar_visible());

        // Records without a description are 6 rows tall
        *app.results_state.offset_mut() = 8;
        assert_eq!(app.scrolled_rows(), 48);
        assert!(app.search_bar_visible());

        *app.results_state.offset_mut() = 9;
        assert_eq!(app.scrolled_rows(), 54);
        assert!(!app.search_bar_visible());

        app.handle_key(key(KeyCode::Char('/')));
        assert!(app.search_bar_visible());
        assert_eq!(app.input_mode, InputMode::Searching);
    }

    #[test]
    fn test_empty_result_clears_selection() {
        let mut app = loaded_app(vec![record(1, "one")]);
        let ticket = app.begin_search("nothing");
        app.complete_search(SearchOutcome {
            seq: ticket.seq,
            query: ticket.query,
            result: Ok(vec![]),
        });
        assert!(app.selected_record().is_none());
    }

    #[test]
    fn test_favorite_and_open_ignored_while_skeleton_shown() {
        let mut app = loaded_app(vec![record(1, "one")]);
        app.begin_search("next");

        assert!(app.selected_record().is_none());
        assert_eq!(app.handle_key(key(KeyCode::Char('f'))), Action::None);
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::None);
        assert!(app.favorites.is_empty());

        // The favorites tab still toggles while a search is in flight
        app.favorites.add(record(2, "two"));
        app.switch_tab(Tab::Favorites);
        app.handle_key(key(KeyCode::Char('f')));
        assert!(app.favorites.is_empty());
    }

    #[test]
    fn test_modified_chars_do_not_edit_query() {
        let mut app = App::default();
        let ctrl_w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        let shift_a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);

        assert_eq!(app.handle_key(ctrl_w), Action::None);
        assert_eq!(app.handle_key(alt_x), Action::None);
        assert!(app.search_input.is_empty());
        assert_eq!(app.handle_key(shift_a), Action::QueryChanged("A".into()));
    }

    #[test]
    fn test_shift_tab_leaves_search_box_for_favorites() {
        let mut app = App::default();
        app.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(app.tab, Tab::Favorites);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_key_press_dismisses_notice() {
        let mut app = App::default();
        let ticket = app.begin_search("boom");
        app.complete_search(SearchOutcome {
            seq: ticket.seq,
            query: ticket.query,
            result: Err(repostar_core::Error::FetchFailed("down".into())),
        });
        assert!(app.session.current_notice().is_some());

        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.session.current_notice().is_none());
    }
}
