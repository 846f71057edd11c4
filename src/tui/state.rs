//! Renderer state management and input handling.

use crate::navigation::InputEvent;
use crate::render::ViewRenderer;
use crate::types::{Episode, Show};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use ratatui::backend::Backend;
use ratatui::widgets::ListState;
use ratatui::Terminal;
use std::io;

use super::render::draw;
use super::types::{Action, ContentKind, Focus, SelectorOption, SelectorValue};

/// Everything the TUI displays.
pub struct ViewState {
    /// Which cards are shown
    pub content: ContentKind,
    /// Show cards currently displayed
    pub shows: Vec<Show>,
    /// Episode cards currently displayed
    pub episodes: Vec<Episode>,
    /// Selector entries while browsing shows
    pub show_options: Vec<SelectorOption>,
    /// Selector entries while browsing episodes
    pub episode_options: Vec<SelectorOption>,
    /// Search status line
    pub status: String,
    /// Whether a fetch is in flight
    pub loading: bool,
    /// Error message to display
    pub error: Option<String>,
    /// Current search box contents
    pub search_input: String,
    /// Whether search bar is focused
    pub search_focused: bool,
    /// Current focus (selector or main)
    pub focus: Focus,
    /// List state for the cards
    pub list_state: ListState,
    /// List state for the selector
    pub selector_state: ListState,
    /// Whether help modal is shown
    pub show_help: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            content: ContentKind::Shows,
            shows: Vec::new(),
            episodes: Vec::new(),
            show_options: vec![SelectorOption::placeholder("Select a show")],
            episode_options: vec![SelectorOption::placeholder("Select an episode")],
            status: String::new(),
            loading: false,
            error: None,
            search_input: String::new(),
            search_focused: false,
            focus: Focus::Main,
            list_state: ListState::default(),
            selector_state: ListState::default().with_selected(Some(0)),
            show_help: false,
            should_quit: false,
        }
    }

    /// Selector entries for the current content kind.
    pub fn options(&self) -> &[SelectorOption] {
        match self.content {
            ContentKind::Shows => &self.show_options,
            ContentKind::Episodes => &self.episode_options,
        }
    }

    /// Number of cards on screen.
    pub fn card_count(&self) -> usize {
        match self.content {
            ContentKind::Shows => self.shows.len(),
            ContentKind::Episodes => self.episodes.len(),
        }
    }

    fn reset_cards(&mut self, content: ContentKind) {
        self.content = content;
        self.loading = false;
        self.error = None;
        let first = if self.card_count() > 0 { Some(0) } else { None };
        self.list_state.select(first);
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        // Global quit with Ctrl+C or Ctrl+Q
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Action::Quit;
                }
                _ => {}
            }
        }

        // Handle help modal
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return Action::None;
        }

        if self.search_focused {
            return self.handle_search_bar_input(key);
        }

        if self.error.is_some() {
            return self.handle_error_input(key);
        }

        match key.code {
            KeyCode::Char('?') => {
                self.show_help = true;
                Action::None
            }
            KeyCode::Char('/') => {
                self.search_focused = true;
                Action::None
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Selector => Focus::Main,
                    Focus::Main => Focus::Selector,
                };
                Action::None
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
                Action::Quit
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                Action::None
            }
            KeyCode::Enter => match self.focus {
                Focus::Selector => self.activate_option(),
                Focus::Main => self.activate_card(),
            },
            KeyCode::Backspace | KeyCode::Esc if self.content == ContentKind::Episodes => {
                Action::Dispatch(InputEvent::BackNavigation)
            }
            _ => Action::None,
        }
    }

    fn handle_search_bar_input(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => {
                self.search_focused = false;
                Action::None
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                Action::Dispatch(InputEvent::SearchInput(self.search_input.clone()))
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                Action::Dispatch(InputEvent::SearchInput(self.search_input.clone()))
            }
            KeyCode::Esc => {
                self.search_input.clear();
                self.search_focused = false;
                Action::Dispatch(InputEvent::SearchInput(String::new()))
            }
            _ => Action::None,
        }
    }

    fn handle_error_input(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('r') => Action::Dispatch(InputEvent::Reload),
            KeyCode::Char('q') => {
                self.should_quit = true;
                Action::Quit
            }
            _ => Action::None,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let (len, list_state) = match self.focus {
            Focus::Selector => (self.options().len(), &mut self.selector_state),
            Focus::Main => (self.card_count(), &mut self.list_state),
        };
        if len == 0 {
            return;
        }

        let current = list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        list_state.select(Some(next));
    }

    fn activate_option(&mut self) -> Action {
        let Some(option) = self
            .selector_state
            .selected()
            .and_then(|i| self.options().get(i))
        else {
            return Action::None;
        };

        let event = match (self.content, &option.value) {
            (ContentKind::Shows, None) => InputEvent::ShowSelected(None),
            (ContentKind::Shows, Some(SelectorValue::Show(id))) => {
                InputEvent::ShowSelected(Some(*id))
            }
            (ContentKind::Episodes, None) => InputEvent::EpisodeSelected(None),
            (ContentKind::Episodes, Some(SelectorValue::Episode(name))) => {
                InputEvent::EpisodeSelected(Some(name.clone()))
            }
            _ => return Action::None,
        };
        Action::Dispatch(event)
    }

    fn activate_card(&mut self) -> Action {
        if self.content != ContentKind::Shows {
            return Action::None;
        }
        match self.list_state.selected().and_then(|i| self.shows.get(i)) {
            Some(show) => Action::Dispatch(InputEvent::ShowTitleActivated(show.id)),
            None => Action::None,
        }
    }
}

/// A [`ViewRenderer`] that draws to a ratatui terminal.
pub struct TuiView<B: Backend> {
    terminal: Terminal<B>,
    state: ViewState,
}

impl<B: Backend> TuiView<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            state: ViewState::new(),
        }
    }

    /// Draw the current state.
    pub fn redraw(&mut self) -> io::Result<()> {
        let Self { terminal, state } = self;
        terminal.draw(|frame| draw(frame, state))?;
        Ok(())
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        self.state.handle_input(key)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> ViewRenderer for TuiView<B> {
    fn render_show_list(&mut self, shows: &[&Show]) {
        self.state.shows = shows.iter().map(|s| (*s).clone()).collect();
        self.state.reset_cards(ContentKind::Shows);
    }

    fn render_episode_list(&mut self, episodes: &[&Episode]) {
        self.state.episodes = episodes.iter().map(|e| (*e).clone()).collect();
        self.state.reset_cards(ContentKind::Episodes);
    }

    fn render_search_status(&mut self, message: &str) {
        self.state.status = message.to_string();
    }

    fn render_show_dropdown(&mut self, shows: &[Show]) {
        let mut options = vec![SelectorOption::placeholder("Select a show")];
        options.extend(shows.iter().map(|s| SelectorOption {
            label: s.name.clone(),
            value: Some(SelectorValue::Show(s.id)),
        }));
        self.state.show_options = options;
        self.state.selector_state.select(Some(0));
    }

    fn render_episode_dropdown(&mut self, episodes: &[Episode]) {
        let mut options = vec![SelectorOption::placeholder("Select an episode")];
        options.extend(episodes.iter().map(|e| SelectorOption {
            label: e.option_label(),
            value: Some(SelectorValue::Episode(e.name.clone())),
        }));
        self.state.episode_options = options;
        self.state.selector_state.select(Some(0));
    }

    fn clear_search_input(&mut self) {
        self.state.search_input.clear();
    }

    fn show_loading(&mut self) {
        self.state.loading = true;
        self.state.error = None;
        // The caller is about to block on the network, so paint now
        if let Err(e) = self.redraw() {
            warn!("Failed to draw loading screen: {}", e);
        }
    }

    fn show_error(&mut self, message: &str) {
        self.state.loading = false;
        self.state.error = Some(message.to_string());
    }
}
