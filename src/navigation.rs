//! Show list / episode list navigation.
//!
//! [`Navigator`] owns everything the browser mutates: the cached catalog, the
//! loaded collections, the current view and the renderer. Each input event is
//! handled to completion, network wait included, before the next one.

use crate::api::CatalogClient;
use crate::cache::CachedCatalog;
use crate::error::{AppError, Result};
use crate::filter::{filter, normalize_query, search_status, EmptyResults, Searchable};
use crate::render::ViewRenderer;
use crate::types::{Episode, Show};
use log::{debug, info, warn};
use std::sync::Arc;

const SHOW_LIST_ERROR: &str = "Failed to load show data. Please try again later.";

/// Which list is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    ShowList,
    EpisodeList { show_id: u32 },
}

/// Current view plus the query typed into the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    view: View,
    last_query: String,
}

impl NavigationState {
    pub fn view(&self) -> View {
        self.view
    }

    /// The open show, present exactly when the episode list is shown.
    pub fn active_show_id(&self) -> Option<u32> {
        match self.view {
            View::ShowList => None,
            View::EpisodeList { show_id } => Some(show_id),
        }
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }
}

/// Input from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The search box now contains this text
    SearchInput(String),
    /// A show was picked in the selector; `None` is the placeholder entry
    ShowSelected(Option<u32>),
    /// An episode was picked by name; `None` is the placeholder entry
    EpisodeSelected(Option<String>),
    /// A show card was activated directly
    ShowTitleActivated(u32),
    /// Explicit request to return to the show list
    BackNavigation,
    /// Re-run the initial show list load
    Reload,
}

struct SearchOutcome<'a, T> {
    visible: Vec<&'a T>,
    matches: usize,
    status: String,
}

fn run_query<'a, T: Searchable>(
    items: &'a [T],
    query: &str,
    empty_results: EmptyResults,
) -> SearchOutcome<'a, T> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return SearchOutcome {
            visible: items.iter().collect(),
            matches: items.len(),
            status: String::new(),
        };
    }

    let hits = filter(items, &needle, T::DEFAULT_FIELDS);
    let matches = hits.len();
    let visible = if hits.is_empty() && empty_results == EmptyResults::ShowAll {
        items.iter().collect()
    } else {
        hits
    };

    SearchOutcome {
        visible,
        matches,
        status: search_status(&needle, matches, T::NOUN),
    }
}

/// The browser's state machine.
pub struct Navigator<C, R> {
    catalog: CachedCatalog<C>,
    renderer: R,
    state: NavigationState,
    shows: Arc<[Show]>,
    episodes: Arc<[Episode]>,
    empty_results: EmptyResults,
    fetch_failed: bool,
}

impl<C: CatalogClient, R: ViewRenderer> Navigator<C, R> {
    /// Create a navigator in the show list view with nothing loaded.
    pub fn new(client: C, renderer: R, empty_results: EmptyResults) -> Self {
        Self {
            catalog: CachedCatalog::new(client),
            renderer,
            state: NavigationState::default(),
            shows: Arc::from(Vec::new()),
            episodes: Arc::from(Vec::new()),
            empty_results,
            fetch_failed: false,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn catalog(&self) -> &CachedCatalog<C> {
        &self.catalog
    }

    /// All loaded shows, sorted by name.
    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    /// Episodes of the active show; empty in the show list view.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Whether the last fetch failed. Only [`InputEvent::Reload`] is honored
    /// while this is set.
    pub fn is_fetch_failed(&self) -> bool {
        self.fetch_failed
    }

    /// Dispatch one input event.
    pub async fn handle(&mut self, event: InputEvent) {
        if self.fetch_failed && event != InputEvent::Reload {
            debug!("Ignoring {:?} after failed fetch", event);
            return;
        }

        match event {
            InputEvent::SearchInput(text) => {
                self.search(&text);
            }
            InputEvent::ShowSelected(Some(show_id)) | InputEvent::ShowTitleActivated(show_id) => {
                // Failures are already on screen
                let _ = self.select_show(show_id).await;
            }
            InputEvent::ShowSelected(None) | InputEvent::BackNavigation => self.back(),
            InputEvent::EpisodeSelected(Some(name)) => self.select_episode(&name),
            InputEvent::EpisodeSelected(None) => self.show_all_episodes(),
            InputEvent::Reload => {
                let _ = self.load().await;
            }
        }
    }

    /// Fetch (or reuse) the show list and display it unfiltered.
    ///
    /// Success clears the fetch-failed flag and resets to the show list view.
    pub async fn load(&mut self) -> Result<()> {
        self.renderer.show_loading();

        match self.catalog.show_list().await {
            Ok(shows) => {
                info!("Loaded {} shows", shows.len());
                self.fetch_failed = false;
                self.shows = shows;
                self.episodes = Arc::from(Vec::new());
                self.state = NavigationState::default();
                self.display_show_list();
                Ok(())
            }
            Err(e) => self.fail(SHOW_LIST_ERROR, e),
        }
    }

    /// Open a show's episode list, fetching episodes on first visit.
    ///
    /// Only valid from the show list; on failure the view does not change.
    pub async fn select_show(&mut self, show_id: u32) -> Result<()> {
        if let Some(active) = self.state.active_show_id() {
            debug!("Show {} requested while show {} is open", show_id, active);
            return Ok(());
        }

        self.renderer.show_loading();

        match self.catalog.episodes(show_id).await {
            Ok(episodes) => {
                info!("Opened show {} with {} episodes", show_id, episodes.len());
                self.episodes = episodes;
                self.state = NavigationState {
                    view: View::EpisodeList { show_id },
                    last_query: String::new(),
                };

                let all: Vec<&Episode> = self.episodes.iter().collect();
                self.renderer.render_episode_list(&all);
                self.renderer.render_episode_dropdown(&self.episodes);
                self.clear_query();
                Ok(())
            }
            Err(e) => {
                let message = format!(
                    "Failed to load episodes for show {}. Please try again later.",
                    show_id
                );
                self.fail(&message, e)
            }
        }
    }

    /// Return to the unfiltered show list.
    pub fn back(&mut self) {
        if self.state.active_show_id().is_none() {
            return;
        }

        self.state = NavigationState::default();
        self.episodes = Arc::from(Vec::new());
        self.display_show_list();
    }

    /// Filter the current view's collection and report the match count.
    ///
    /// Returns the number of matching items; a blank query matches everything.
    pub fn search(&mut self, query: &str) -> usize {
        self.state.last_query = query.to_string();

        let (matches, status) = match self.state.view {
            View::ShowList => {
                let outcome = run_query(&self.shows, query, self.empty_results);
                self.renderer.render_show_list(&outcome.visible);
                (outcome.matches, outcome.status)
            }
            View::EpisodeList { .. } => {
                let outcome = run_query(&self.episodes, query, self.empty_results);
                self.renderer.render_episode_list(&outcome.visible);
                (outcome.matches, outcome.status)
            }
        };

        debug!("Query {:?} matched {} items", query, matches);
        self.renderer.render_search_status(&status);
        matches
    }

    /// Narrow the episode list to the episode named exactly `name`.
    pub fn select_episode(&mut self, name: &str) {
        if self.state.active_show_id().is_none() {
            return;
        }

        match self.episodes.iter().find(|e| e.name == name) {
            Some(episode) => {
                self.renderer.render_episode_list(&[episode]);
                self.clear_query();
            }
            None => warn!("No episode named {:?} in the open show", name),
        }
    }

    /// Restore the full episode list of the open show.
    fn show_all_episodes(&mut self) {
        if self.state.active_show_id().is_none() {
            return;
        }

        let all: Vec<&Episode> = self.episodes.iter().collect();
        self.renderer.render_episode_list(&all);
        self.clear_query();
    }

    fn display_show_list(&mut self) {
        let all: Vec<&Show> = self.shows.iter().collect();
        self.renderer.render_show_list(&all);
        self.renderer.render_show_dropdown(&self.shows);
        self.clear_query();
    }

    fn clear_query(&mut self) {
        self.state.last_query.clear();
        self.renderer.render_search_status("");
        self.renderer.clear_search_input();
    }

    fn fail(&mut self, message: &str, err: AppError) -> Result<()> {
        warn!("{} ({})", message, err);
        self.fetch_failed = true;
        self.renderer.show_error(message);
        Err(err)
    }
}
