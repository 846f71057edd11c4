//! The interface the navigator draws through.

use crate::types::{Episode, Show};

/// Receives display updates from the navigator.
///
/// All calls are fire-and-forget: the navigator never reads anything back.
/// Missing optional fields (images, ratings) are the renderer's to tolerate.
pub trait ViewRenderer {
    /// Display a list of show cards.
    fn render_show_list(&mut self, shows: &[&Show]);

    /// Display a list of episode cards.
    fn render_episode_list(&mut self, episodes: &[&Episode]);

    /// Display the search status line. An empty message clears it.
    fn render_search_status(&mut self, message: &str);

    /// Fill the show selector.
    fn render_show_dropdown(&mut self, shows: &[Show]);

    /// Fill the episode selector.
    fn render_episode_dropdown(&mut self, episodes: &[Episode]);

    /// Reset the visible search box to empty.
    fn clear_search_input(&mut self);

    /// Indicate that a fetch is in progress.
    fn show_loading(&mut self);

    /// Display an error message in place of the content.
    fn show_error(&mut self, message: &str);
}
